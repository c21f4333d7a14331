pub mod memory;

pub use memory::InMemoryRegistry;
pub use tinylink_core::registry::{ReadRegistry, Registry, Result};
pub use tinylink_core::{Conflict, StorageError};
