//! Target engine implementations.

mod memory;

pub use memory::{IndexDef, MemoryStore, Record, TypeDef};
