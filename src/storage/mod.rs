//! Key-value persistence for session progress

mod errors;
mod store;

pub use errors::StorageError;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
