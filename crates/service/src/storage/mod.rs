//! Storage abstractions for service layer
//!
//! File-backed, in-memory sequences that are read once and written back on
//! demand.

pub mod json_seq_store;
