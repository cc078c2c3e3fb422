use crate::api::{ActionResult, ApiClient, ApiError, read_json};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::session::events::{AuthEvent, AuthEvents, SubscriptionId};
use crate::session::state::{Credential, ROLE_KEY, SESSION_KEYS, TOKEN_KEY, USERNAME_KEY};
use crate::storage::{SessionStore, StoreError};
use metrics::counter;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Session manager errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to save session: {0}")]
    Store(#[from] StoreError),
}

/// Endpoint and wording for one way of obtaining a credential
struct AuthFlow {
    name: &'static str,
    path: &'static str,
    success: &'static str,
    failure: &'static str,
    /// Replaces the generic failure text on 401
    unauthorized: Option<&'static str>,
}

const LOGIN: AuthFlow = AuthFlow {
    name: "login",
    path: "/api/Auth/login",
    success: "Login successful!",
    failure: "Login failed",
    unauthorized: Some("Invalid username or password"),
};

const REGISTER: AuthFlow = AuthFlow {
    name: "register",
    path: "/api/Auth/register",
    success: "Registration successful!",
    failure: "Registration failed",
    unauthorized: None,
};

impl AuthFlow {
    fn failure_message(&self, error: &SessionError) -> String {
        match error {
            SessionError::Api(e @ ApiError::Unauthorized { .. }) => match self.unauthorized {
                Some(message) => message.to_string(),
                None => format!("{}: {}", self.failure, e.detail()),
            },
            SessionError::Api(ApiError::Status { body, .. }) => {
                format!("{}: {}", self.failure, body)
            }
            SessionError::Api(e @ ApiError::RateLimited { .. }) => {
                format!("{}: {}", self.failure, e.detail())
            }
            SessionError::Api(ApiError::Transport(e)) => {
                format!("Network error: {}. Make sure the backend is running.", e)
            }
            SessionError::Api(e @ ApiError::Decode(_)) => format!("Unexpected error: {}", e),
            SessionError::Store(e) => format!("Unexpected error: Failed to save session: {}", e),
        }
    }
}

/// Single source of truth for who is signed in.
///
/// Durable storage, the shared client's default bearer and the subscribers
/// are updated together by every mutating operation, in that order.
/// Establishing, clearing and restoring a credential are serialized, so a
/// logout racing a login either lands before the login's writes or after
/// its bearer update, never in between.
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<dyn SessionStore>,
    auth_base_url: String,
    events: AuthEvents,
    /// Held for the whole of each credential transition
    transition: Mutex<()>,
}

impl SessionManager {
    pub fn new(
        api: Arc<ApiClient>,
        store: Arc<dyn SessionStore>,
        auth_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            auth_base_url: auth_base_url.into().trim_end_matches('/').to_string(),
            events: AuthEvents::new(),
            transition: Mutex::new(()),
        }
    }

    /// The shared backend client this manager keeps authorized
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Restore the bearer from a credential persisted by an earlier run.
    /// The token is not re-validated and no event is raised.
    pub async fn initialize(&self) {
        let _transition = self.transition.lock().await;
        match self.token().await {
            Some(token) if !token.is_empty() => {
                self.api.set_bearer(&token);
                info!("Restored persisted session");
            }
            _ => debug!("No persisted session to restore"),
        }
    }

    /// Authenticate with username and password
    pub async fn login(&self, request: &LoginRequest) -> ActionResult {
        self.authenticate(&LOGIN, request).await
    }

    /// Create an account; success signs the new account in immediately
    pub async fn register(&self, request: &RegisterRequest) -> ActionResult {
        self.authenticate(&REGISTER, request).await
    }

    async fn authenticate<B: Serialize + ?Sized>(&self, flow: &AuthFlow, body: &B) -> ActionResult {
        counter!("studio_logins_total", "flow" => flow.name).increment(1);

        match self.try_authenticate(flow, body).await {
            Ok(credential) => {
                info!("{} succeeded for {} ({})", flow.name, credential.username, credential.role);
                ActionResult::ok(flow.success)
            }
            Err(e) => {
                warn!("{} failed: {}", flow.name, e);
                counter!("studio_login_failures_total", "flow" => flow.name).increment(1);
                ActionResult::failed(flow.failure_message(&e))
            }
        }
    }

    async fn try_authenticate<B: Serialize + ?Sized>(
        &self,
        flow: &AuthFlow,
        body: &B,
    ) -> Result<Credential, SessionError> {
        let url = format!("{}{}", self.auth_base_url, flow.path);
        let builder = self.api.request(Method::POST, &url, None).json(body);
        let response = self.api.send(builder).await?;
        let auth: AuthResponse = read_json(response).await?;

        let credential = Credential::from(auth);
        self.establish(&credential).await?;
        Ok(credential)
    }

    /// Persist, authorize, notify
    async fn establish(&self, credential: &Credential) -> Result<(), SessionError> {
        let _transition = self.transition.lock().await;
        if let Err(e) = self.persist(credential).await {
            error!("Failed to persist credential: {}", e);
            // A half-written credential must not survive; drop the session entirely
            self.clear().await;
            return Err(e.into());
        }

        self.api.set_bearer(&credential.token);
        self.events.emit();
        Ok(())
    }

    async fn persist(&self, credential: &Credential) -> Result<(), StoreError> {
        for (key, value) in credential.entries() {
            self.store.set_item(key, value).await?;
        }
        Ok(())
    }

    /// Forget the credential. Safe to call when nobody is signed in.
    pub async fn logout(&self) {
        let _transition = self.transition.lock().await;
        self.clear().await;
    }

    async fn clear(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove_item(key).await {
                error!("Failed to remove {} from session store: {}", key, e);
            }
        }

        self.api.clear_bearer();
        counter!("studio_logouts_total").increment(1);
        info!("Session cleared");
        self.events.emit();
    }

    /// True when a non-empty token is stored. Expiry is the backend's concern.
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some_and(|token| !token.is_empty())
    }

    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await
    }

    pub async fn username(&self) -> Option<String> {
        self.read(USERNAME_KEY).await
    }

    pub async fn role(&self) -> Option<String> {
        self.read(ROLE_KEY).await
    }

    /// The full credential, when a non-empty token is stored
    pub async fn credential(&self) -> Option<Credential> {
        let token = self.token().await.filter(|token| !token.is_empty())?;
        Some(Credential {
            token,
            username: self.username().await.unwrap_or_default(),
            role: self.role().await.unwrap_or_default(),
        })
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get_item(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {} from session store: {}", key, e);
                None
            }
        }
    }

    /// Register a handler for credential changes
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(AuthEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn manager_with(store: Arc<dyn SessionStore>) -> SessionManager {
        let api = Arc::new(ApiClient::with_client(reqwest::Client::new()));
        // Nothing listens here; these tests never reach the network
        SessionManager::new(api, store, "http://127.0.0.1:9/")
    }

    fn credential() -> Credential {
        Credential {
            token: "token-abc".to_string(),
            username: "admin".to_string(),
            role: "Admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initialize_restores_bearer_without_event() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(TOKEN_KEY, "persisted").await.unwrap();
        let manager = manager_with(store);

        let events = Arc::new(AtomicUsize::new(0));
        let counter = events.clone();
        manager.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.initialize().await;

        assert_eq!(manager.api().bearer().as_deref(), Some("persisted"));
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_initialize_ignores_empty_token() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(TOKEN_KEY, "").await.unwrap();
        let manager = manager_with(store);

        manager.initialize().await;

        assert!(manager.api().bearer().is_none());
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_establish_then_logout_keeps_state_in_step() {
        let manager = manager_with(Arc::new(MemoryStore::new()));
        let events = Arc::new(AtomicUsize::new(0));
        let counter = events.clone();
        manager.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.establish(&credential()).await.unwrap();
        assert!(manager.is_authenticated().await);
        assert_eq!(manager.credential().await, Some(credential()));
        assert_eq!(manager.api().bearer().as_deref(), Some("token-abc"));
        assert_eq!(events.load(Ordering::SeqCst), 1);

        manager.logout().await;
        manager.logout().await;
        assert!(!manager.is_authenticated().await);
        assert_eq!(manager.username().await, None);
        assert_eq!(manager.role().await, None);
        assert!(manager.api().bearer().is_none());
        assert_eq!(events.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_header_is_cleared_before_subscribers_run() {
        let manager = Arc::new(manager_with(Arc::new(MemoryStore::new())));
        manager.establish(&credential()).await.unwrap();

        let api = manager.api().clone();
        let observed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = observed.clone();
        manager.subscribe(move |_| {
            sink.lock().unwrap().push(api.bearer());
        });

        manager.logout().await;
        assert_eq!(*observed.lock().unwrap(), vec![None]);
    }

    /// Store whose writes fail after a fixed number of successes
    struct FlakyStore {
        inner: MemoryStore,
        writes_left: AtomicUsize,
    }

    #[async_trait]
    impl SessionStore for FlakyStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.writes_left.load(Ordering::SeqCst) == 0 {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.writes_left.fetch_sub(1, Ordering::SeqCst);
            self.inner.set_item(key, value).await
        }

        async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove_item(key).await
        }
    }

    #[tokio::test]
    async fn test_partial_persist_is_rolled_back() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            writes_left: AtomicUsize::new(1),
        });
        let manager = manager_with(store.clone());

        let result = manager.establish(&credential()).await;

        assert!(matches!(result, Err(SessionError::Store(_))));
        assert!(store.inner.is_empty().await);
        assert!(manager.api().bearer().is_none());
        assert!(!manager.is_authenticated().await);
    }

    #[test]
    fn test_login_failure_messages() {
        assert_eq!(
            LOGIN.failure_message(&SessionError::Api(ApiError::Unauthorized {
                body: "Bad credentials".to_string(),
            })),
            "Invalid username or password"
        );
        assert_eq!(
            REGISTER.failure_message(&SessionError::Api(ApiError::Status {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "Username already exists".to_string(),
            })),
            "Registration failed: Username already exists"
        );
        assert_eq!(
            LOGIN.failure_message(&SessionError::Api(ApiError::RateLimited {
                body: "Locked for 5 minutes".to_string(),
            })),
            "Login failed: Locked for 5 minutes"
        );
    }
}
