//! World access seam and an in-memory world.
#![forbid(unsafe_code)]

pub mod access;
pub mod memory;

pub use access::BlockAccess;
pub use memory::{MemoryWorld, WorldError, WorldStats};
