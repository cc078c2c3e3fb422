//! Durable client-side key/value storage for session data
//!
//! This module provides:
//! - `SessionStore` trait for abstracting where session values live
//! - `MemoryStore` for tests and ephemeral sessions
//! - `FileStore` for a JSON file that survives restarts

mod file;
mod memory;
mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{SessionStore, StoreError};
