//! Backend API plumbing shared by the session manager and the services

pub mod client;
mod error;
mod outcome;

pub use client::{ApiClient, ensure_success, read_json};
pub use error::ApiError;
pub use outcome::{ActionMessages, ActionResult};
