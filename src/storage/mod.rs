//! Storage implementations of the Db capability

pub mod in_memory;

pub use in_memory::InMemoryDb;
