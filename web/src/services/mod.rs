//! Typed wrappers over the backend's resource groups
//!
//! Each wrapper issues exactly one HTTP request per call. Protected calls
//! read the token from the session manager and pass it with the request;
//! without a token the request goes out unauthenticated and the backend
//! decides.

mod contact;
mod content;

pub use contact::ContactService;
pub use content::{ContentResource, ContentService, ListFilter};

use metrics::counter;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::api::{ApiClient, ApiError, ensure_success, read_json};
use crate::session::SessionManager;

/// One resource group: a base URL plus the session that authorizes it
#[derive(Clone)]
struct ResourceClient {
    session: Arc<SessionManager>,
    base_url: String,
}

impl ResourceClient {
    fn new(session: Arc<SessionManager>, base_url: impl Into<String>) -> Self {
        Self {
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn api(&self) -> &ApiClient {
        self.session.api()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without an explicit credential
    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.api().request(method, &self.url(path), None)
    }

    /// Request carrying the session's current token, if any
    async fn protected(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.session.token().await;
        self.api().request(method, &self.url(path), token.as_deref())
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.api().send(builder).await?;
        read_json(response).await
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = self.api().send(builder).await?;
        ensure_success(response).await.map(|_| ())
    }
}

/// Collapse a failed read into the type's empty value.
/// Callers that must tell "empty" from "failed" use the `try_` forms.
fn or_default<T: Default>(result: Result<T, ApiError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("Error getting {} ({}): {}", what, e.kind(), e);
        counter!("studio_read_failures_total", "kind" => e.kind()).increment(1);
        T::default()
    })
}
