//! Service layer holding the in-memory record sequences.
//! - `storage` keeps one JSON-file-backed sequence per entity.
//! - `entity_store` owns the three sequences and the create paths that need
//!   key generation.
//! - `keygen` draws parent keys and derives child ids.

pub mod errors;
pub mod keygen;
pub mod storage;
pub mod entity_store;

pub use entity_store::{Counts, EntityStore};
pub use errors::ServiceError;
