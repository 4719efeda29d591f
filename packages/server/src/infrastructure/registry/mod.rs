//! ClientRegistry の実装

pub mod inmemory;

pub use inmemory::InMemoryClientRegistry;
