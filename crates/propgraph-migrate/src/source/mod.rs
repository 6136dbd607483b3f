//! Source graph implementations.

pub mod json;
mod memory;

pub use memory::MemoryGraph;
