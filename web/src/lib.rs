//! Studio Web Library
//!
//! Session handling and backend API clients for the studio front-end,
//! exported for the server binary and integration tests.

pub mod api;
pub mod config;
pub mod models;
pub mod server;
pub mod services;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use api::{ActionResult, ApiClient, ApiError};
pub use config::Config;
pub use server::{AppState, frontend_routes};
pub use services::{ContactService, ContentService, ListFilter};
pub use session::SessionManager;
pub use storage::{FileStore, MemoryStore, SessionStore};
