//! Non-persistent storage for development and testing

mod memory;

pub use memory::InMemoryRepositoryProvider;
