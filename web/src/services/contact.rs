//! Contact form submission and the administrator's inbox

use reqwest::Method;
use std::sync::Arc;

use super::{ResourceClient, or_default};
use crate::api::{ActionMessages, ActionResult, ApiError};
use crate::models::{ContactSubmission, ContactSubmissionCreate};
use crate::session::SessionManager;

const CONTACT_PATH: &str = "/api/Contact";

const SUBMIT: ActionMessages = ActionMessages::new(
    "Thank you! Your message has been sent successfully. We'll get back to you soon.",
    "Failed to send message",
)
.with_rate_limited("You've submitted too many messages. Please try again later.")
.with_network_hint("Please make sure you're connected to the internet.");

const MARK_READ: ActionMessages =
    ActionMessages::new("Message marked as read.", "Failed to mark message as read");

const DELETE: ActionMessages = ActionMessages::new("Message deleted.", "Failed to delete message");

/// Client for the communication backend
#[derive(Clone)]
pub struct ContactService {
    backend: ResourceClient,
}

impl ContactService {
    pub fn new(session: Arc<SessionManager>, base_url: impl Into<String>) -> Self {
        Self {
            backend: ResourceClient::new(session, base_url),
        }
    }

    /// Submit the public contact form. No credential is required.
    pub async fn submit(&self, submission: &ContactSubmissionCreate) -> ActionResult {
        let builder = self.backend.public(Method::POST, CONTACT_PATH).json(submission);
        SUBMIT.outcome(self.backend.execute(builder).await)
    }

    /// All submissions, or only unread ones. Empty on any failure.
    pub async fn submissions(&self, unread_only: bool) -> Vec<ContactSubmission> {
        or_default(self.try_submissions(unread_only).await, "contact submissions")
    }

    pub async fn try_submissions(&self, unread_only: bool) -> Result<Vec<ContactSubmission>, ApiError> {
        let mut builder = self.backend.protected(Method::GET, CONTACT_PATH).await;
        if unread_only {
            builder = builder.query(&[("unreadOnly", "true")]);
        }
        self.backend.fetch(builder).await
    }

    /// One submission; `None` on any failure
    pub async fn submission(&self, id: i32) -> Option<ContactSubmission> {
        or_default(self.try_submission(id).await.map(Some), "contact submission")
    }

    pub async fn try_submission(&self, id: i32) -> Result<ContactSubmission, ApiError> {
        let builder = self
            .backend
            .protected(Method::GET, &format!("{}/{}", CONTACT_PATH, id))
            .await;
        self.backend.fetch(builder).await
    }

    pub async fn mark_as_read(&self, id: i32) -> ActionResult {
        let builder = self
            .backend
            .protected(Method::PUT, &format!("{}/{}/mark-read", CONTACT_PATH, id))
            .await;
        MARK_READ.outcome(self.backend.execute(builder).await)
    }

    pub async fn delete(&self, id: i32) -> ActionResult {
        let builder = self
            .backend
            .protected(Method::DELETE, &format!("{}/{}", CONTACT_PATH, id))
            .await;
        DELETE.outcome(self.backend.execute(builder).await)
    }
}
