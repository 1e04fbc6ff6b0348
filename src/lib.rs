//! Companion Store Library
//!
//! Local persistence for the AI companion app: typed record sections over a
//! key-value backend, with JSON backup export, import and reset.

pub mod storage;
pub mod types;

pub use storage::{SectionalStore, StorageError, StoreConfig};
