//! In-process storage. Nothing survives a restart.

pub mod store;
mod user_repo_impl;
mod tenant_repo_impl;
mod bill_repo_impl;

pub use store::MemoryStore;
