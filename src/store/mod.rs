//! Persistence layer: small JSON key-value stores.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, keys};
