//! # Rentbook Infrastructure
//! 
//! Storage implementations (adapters) for the core repository ports.

pub mod memory;

pub use memory::MemoryStore;
