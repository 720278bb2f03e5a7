//! Record types for the three entity sequences and the request bodies that
//! create or patch them.
//!
//! Non-key fields are kept as raw JSON values: whatever the client sent is
//! stored and echoed back, and a field that was never sent stays absent.

pub mod field;
pub mod record;
pub mod parent;
pub mod child;
pub mod admin;

pub use admin::{Admin, AdminFields};
pub use child::{Child, ChildPatch, NewChild};
pub use parent::{Parent, ParentFields};
pub use record::Record;
