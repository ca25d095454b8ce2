//! Storage implementations.

mod memory;

pub use memory::{InMemoryPostRepository, InMemoryRepository, InMemoryUserRepository};
