//! Server-Sent Events bridge for auth changes
//!
//! Each connected client gets its own subscription, removed when the
//! client goes away and the stream is dropped.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use super::state::AppState;
use crate::session::{SessionManager, SubscriptionId};

/// Name of the SSE event sent on every credential change
pub const AUTH_CHANGED_EVENT: &str = "auth-changed";

/// Unsubscribes when the owning stream is dropped
struct SubscriptionGuard {
    session: Arc<SessionManager>,
    id: SubscriptionId,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.session.unsubscribe(self.id);
        debug!("Auth event stream closed ({:?})", self.id);
    }
}

/// GET /session/events - stream of `auth-changed` events
pub async fn auth_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel::<()>();
    let id = state.session.subscribe(move |_| {
        let _ = tx.send(());
    });
    debug!("Auth event stream opened ({:?})", id);

    let guard = SubscriptionGuard {
        session: state.session.clone(),
        id,
    };

    let events = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        rx.recv().await?;
        let event = Event::default().event(AUTH_CHANGED_EVENT).data("changed");
        Some((Ok(event), (rx, guard)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
