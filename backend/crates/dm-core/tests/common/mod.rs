#![allow(dead_code)]

pub mod fixtures;
pub mod in_memory_registry;

pub use fixtures::*;
pub use in_memory_registry::{InMemoryRegistry, TwinUpdate};
