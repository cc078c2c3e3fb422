//! Auth change notifications
//!
//! Handlers run synchronously on the task that changed the credential, in
//! the order they subscribed. The handler list is snapshotted before
//! dispatch, so a handler may subscribe or unsubscribe without deadlocking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// The active credential was set or cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthEvent;

/// Handle returned by [`AuthEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(AuthEvent) + Send + Sync>;

/// Subscriber registry for [`AuthEvent`]
#[derive(Default)]
pub struct AuthEvents {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, Handler)>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(AuthEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Notify every subscriber; returns how many were called
    pub fn emit(&self) -> usize {
        let handlers: Vec<Handler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            handler(AuthEvent);
        }
        handlers.len()
    }
}

impl std::fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
