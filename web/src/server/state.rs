//! Shared application state for the front-end routes

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::BackendConfig;
use crate::services::{ContactService, ContentService};
use crate::session::SessionManager;
use crate::storage::SessionStore;

/// Everything a route handler needs: one session and the services bound to it
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub contact: ContactService,
    pub content: ContentService,
}

impl AppState {
    /// Wire the shared client, session manager and services together
    pub fn new(backend: &BackendConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(backend.request_timeout)?);
        Ok(Self::with_api(api, backend, store))
    }

    pub fn with_api(
        api: Arc<ApiClient>,
        backend: &BackendConfig,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let session = Arc::new(SessionManager::new(api, store, backend.auth_url.as_str()));
        Self {
            contact: ContactService::new(session.clone(), backend.communication_url.as_str()),
            content: ContentService::new(session.clone(), backend.content_url.as_str()),
            session,
        }
    }
}
