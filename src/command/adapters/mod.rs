//! Adapter implementations for command ports.

mod memory;

pub use memory::InMemoryRemoteRegistry;
