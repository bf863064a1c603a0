//! Backend implementations.

pub mod memory;

pub use memory::{BufferCell, MemoryBackend};
