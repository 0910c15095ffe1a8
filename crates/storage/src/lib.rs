//! Storage backends for Cadence data.
//!
//! The engine consumes the [`Storage`] trait; backends here cover JSON files
//! on disk and an in-memory map for tests and ephemeral runs.

#![warn(missing_docs)]

mod trait_;
mod json_storage;
mod memory;

pub use trait_::{Result, Storage, StorageError};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
