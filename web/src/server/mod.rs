//! Front-end HTTP surface
//!
//! This module provides:
//! - `AppState` wiring one session manager to the services
//! - JSON routes over the session and the services
//! - an SSE stream of auth changes for the pages

pub mod events;
pub mod routes;
mod state;

pub use routes::{ErrorResponse, SessionStatus, frontend_routes};
pub use state::AppState;
