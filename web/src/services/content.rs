//! Marketing content: promos, photos, videos and the about-us page
//!
//! Promos, photos and videos share one REST shape, so they are served by
//! generic methods keyed on [`ContentResource`].

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{ResourceClient, or_default};
use crate::api::{ActionMessages, ActionResult, ApiError};
use crate::models::{
    AboutUs, AboutUsUpdate, Photo, PhotoCreate, Promo, PromoCreate, Video, VideoCreate,
};
use crate::session::SessionManager;

const ABOUT_US_PATH: &str = "/api/AboutUs";

const UPDATE_ABOUT_US: ActionMessages =
    ActionMessages::new("About Us updated successfully!", "Failed to update");

/// A listable, creatable, deletable content collection on the backend
pub trait ContentResource: DeserializeOwned + Send + 'static {
    /// Body sent on create
    type Create: Serialize + Send + Sync;

    /// Collection path, e.g. `/api/Promos`
    const PATH: &'static str;
    /// Singular noun for logs
    const NOUN: &'static str;
    /// Whether the backend understands the `category` filter
    const FILTERS_BY_CATEGORY: bool;

    const CREATE: ActionMessages;
    const DELETE: ActionMessages;
}

impl ContentResource for Promo {
    type Create = PromoCreate;
    const PATH: &'static str = "/api/Promos";
    const NOUN: &'static str = "promo";
    const FILTERS_BY_CATEGORY: bool = false;
    const CREATE: ActionMessages =
        ActionMessages::new("Promo created successfully!", "Failed to create promo");
    const DELETE: ActionMessages =
        ActionMessages::new("Promo deleted successfully!", "Failed to delete promo");
}

impl ContentResource for Photo {
    type Create = PhotoCreate;
    const PATH: &'static str = "/api/Photos";
    const NOUN: &'static str = "photo";
    const FILTERS_BY_CATEGORY: bool = true;
    const CREATE: ActionMessages =
        ActionMessages::new("Photo added successfully!", "Failed to add photo");
    const DELETE: ActionMessages =
        ActionMessages::new("Photo deleted successfully!", "Failed to delete photo");
}

impl ContentResource for Video {
    type Create = VideoCreate;
    const PATH: &'static str = "/api/Videos";
    const NOUN: &'static str = "video";
    const FILTERS_BY_CATEGORY: bool = true;
    const CREATE: ActionMessages =
        ActionMessages::new("Video added successfully!", "Failed to add video");
    const DELETE: ActionMessages =
        ActionMessages::new("Video deleted successfully!", "Failed to delete video");
}

/// Optional list constraints. The default constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub active_only: bool,
    pub category: Option<String>,
}

impl ListFilter {
    pub fn active() -> Self {
        Self {
            active_only: true,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Query pairs for the filters that are actually set
    pub fn query_pairs(&self, with_category: bool) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.active_only {
            pairs.push(("activeOnly", "true".to_string()));
        }
        if with_category
            && let Some(category) = self.category.as_deref()
            && !category.is_empty()
        {
            pairs.push(("category", category.to_string()));
        }
        pairs
    }
}

/// Client for the content backend
#[derive(Clone)]
pub struct ContentService {
    backend: ResourceClient,
}

impl ContentService {
    pub fn new(session: Arc<SessionManager>, base_url: impl Into<String>) -> Self {
        Self {
            backend: ResourceClient::new(session, base_url),
        }
    }

    /// Public list; empty on any failure
    pub async fn list<R: ContentResource>(&self, filter: &ListFilter) -> Vec<R> {
        or_default(self.try_list(filter).await, R::NOUN)
    }

    pub async fn try_list<R: ContentResource>(&self, filter: &ListFilter) -> Result<Vec<R>, ApiError> {
        let pairs = filter.query_pairs(R::FILTERS_BY_CATEGORY);
        let mut builder = self.backend.public(Method::GET, R::PATH);
        if !pairs.is_empty() {
            builder = builder.query(&pairs);
        }
        self.backend.fetch(builder).await
    }

    /// Public single item; `None` on any failure
    pub async fn get<R: ContentResource>(&self, id: i32) -> Option<R> {
        or_default(self.try_get(id).await.map(Some), R::NOUN)
    }

    pub async fn try_get<R: ContentResource>(&self, id: i32) -> Result<R, ApiError> {
        let builder = self
            .backend
            .public(Method::GET, &format!("{}/{}", R::PATH, id));
        self.backend.fetch(builder).await
    }

    pub async fn create<R: ContentResource>(&self, item: &R::Create) -> ActionResult {
        let builder = self.backend.protected(Method::POST, R::PATH).await.json(item);
        R::CREATE.outcome(self.backend.execute(builder).await)
    }

    pub async fn delete<R: ContentResource>(&self, id: i32) -> ActionResult {
        let builder = self
            .backend
            .protected(Method::DELETE, &format!("{}/{}", R::PATH, id))
            .await;
        R::DELETE.outcome(self.backend.execute(builder).await)
    }

    /// Public about-us page; `None` on any failure
    pub async fn about_us(&self) -> Option<AboutUs> {
        or_default(self.try_about_us().await.map(Some), "About Us")
    }

    pub async fn try_about_us(&self) -> Result<AboutUs, ApiError> {
        let builder = self.backend.public(Method::GET, ABOUT_US_PATH);
        self.backend.fetch(builder).await
    }

    pub async fn update_about_us(&self, update: &AboutUsUpdate) -> ActionResult {
        let builder = self
            .backend
            .protected(Method::PUT, ABOUT_US_PATH)
            .await
            .json(update);
        UPDATE_ABOUT_US.outcome(self.backend.execute(builder).await)
    }
}
