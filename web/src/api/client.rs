//! Shared backend HTTP client
//!
//! One `ApiClient` is shared by the session manager and every service. It
//! owns the default bearer credential: login, register, logout and
//! initialize keep it in step with durable storage. Requests built with an
//! explicit token use that token instead, so protected calls never depend
//! on whatever another call left behind.

use metrics::{counter, histogram};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use super::error::ApiError;

/// Header carrying a per-request correlation id to the backend
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct ApiClient {
    http: reqwest::Client,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client; `timeout` of `None` waits on the backend indefinitely
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?))
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            bearer: RwLock::new(None),
        }
    }

    /// Current default bearer token
    pub fn bearer(&self) -> Option<String> {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the default bearer token
    pub fn set_bearer(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Drop the default bearer token
    pub fn clear_bearer(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Start a request. `token` wins over the default bearer when given;
    /// empty tokens are never sent.
    pub fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        let token = match token {
            Some(token) => Some(token.to_string()),
            None => self.bearer(),
        };
        match token {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Execute a request built by [`ApiClient::request`]
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let request = builder.header(REQUEST_ID_HEADER, &request_id).build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let start = Instant::now();
        let result = self.http.execute(request).await;
        histogram!("studio_backend_request_duration_seconds").record(start.elapsed());

        match result {
            Ok(response) => {
                debug!(
                    "{} {} -> {} [{}] in {:?}",
                    method,
                    url,
                    response.status(),
                    request_id,
                    start.elapsed()
                );
                counter!("studio_backend_requests_total", "outcome" => "response").increment(1);
                Ok(response)
            }
            Err(e) => {
                debug!("{} {} failed [{}]: {}", method, url, request_id, e);
                counter!("studio_backend_requests_total", "outcome" => "transport_error")
                    .increment(1);
                Err(ApiError::Transport(e))
            }
        }
    }
}

/// Map a non-success status onto the error taxonomy
pub async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized { body }),
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited { body }),
        _ => Err(ApiError::Status { status, body }),
    }
}

/// Check the status, then decode a JSON body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_token_wins_over_default() {
        let client = ApiClient::with_client(reqwest::Client::new());
        client.set_bearer("default-token");

        let request = client
            .request(Method::GET, "http://localhost/api/Contact", Some("explicit"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer explicit"
        );
    }

    #[tokio::test]
    async fn test_default_bearer_applies_until_cleared() {
        let client = ApiClient::with_client(reqwest::Client::new());
        client.set_bearer("abc");

        let request = client
            .request(Method::GET, "http://localhost/api/Promos", None)
            .build()
            .unwrap();
        assert_eq!(request.headers()[reqwest::header::AUTHORIZATION], "Bearer abc");

        client.clear_bearer();
        let request = client
            .request(Method::GET, "http://localhost/api/Promos", None)
            .build()
            .unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_not_sent() {
        let client = ApiClient::with_client(reqwest::Client::new());
        let request = client
            .request(Method::DELETE, "http://localhost/api/Promos/1", Some(""))
            .build()
            .unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }
}
