//! Marketing content: promos, photos, videos and the about-us page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use validator::Validate;

use super::validation::not_blank;

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromoCreate {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Image URL is required"),
        url(message = "Please enter a valid URL")
    )]
    pub image_url: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Display order must be between 0 and 100"))]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for PromoCreate {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            image_url: String::new(),
            display_order: 0,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCreate {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Image URL is required"),
        url(message = "Please enter a valid URL")
    )]
    pub image_url: String,
    #[serde(default)]
    #[validate(url(message = "Please enter a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Display order must be between 0 and 100"))]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for PhotoCreate {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            image_url: String::new(),
            thumbnail_url: None,
            category: None,
            display_order: 0,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoCreate {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Video URL is required"),
        url(message = "Please enter a valid URL")
    )]
    pub video_url: String,
    #[serde(default)]
    #[validate(url(message = "Please enter a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 3600, message = "Duration must be between 0 and 3600 seconds"))]
    pub duration: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Display order must be between 0 and 100"))]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for VideoCreate {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            video_url: String::new(),
            thumbnail_url: None,
            duration: None,
            category: None,
            display_order: 0,
            is_active: true,
        }
    }
}

/// Singleton page content; there is no list or delete for it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUs {
    pub id: i32,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutUsUpdate {
    #[validate(
        custom(function = "not_blank", message = "Content is required"),
        length(min = 50, message = "Content must be at least 50 characters")
    )]
    pub content: String,
    #[serde(default)]
    #[validate(url(message = "Please enter a valid URL"))]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::field_errors;

    #[test]
    fn test_promo_create_defaults() {
        let promo: PromoCreate =
            serde_json::from_str(r#"{"title":"Summer","imageUrl":"https://cdn.example.com/s.jpg"}"#)
                .unwrap();
        assert_eq!(promo.display_order, 0);
        assert!(promo.is_active);
        assert!(promo.validate().is_ok());
    }

    #[test]
    fn test_promo_create_rules() {
        let promo = PromoCreate {
            title: String::new(),
            image_url: "nope".to_string(),
            display_order: 101,
            ..Default::default()
        };
        let errors = field_errors(&promo.validate().unwrap_err());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["displayOrder", "imageUrl", "title"]);
    }

    #[test]
    fn test_video_duration_bounds() {
        let mut video = VideoCreate {
            title: "Reel".to_string(),
            video_url: "https://videos.example.com/reel.mp4".to_string(),
            duration: Some(3601),
            ..Default::default()
        };
        let errors = field_errors(&video.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "duration");

        video.duration = None;
        assert!(video.validate().is_ok());
    }

    #[test]
    fn test_about_us_requires_long_content() {
        let update = AboutUsUpdate {
            content: "Too short".to_string(),
            image_url: None,
        };
        let errors = field_errors(&update.validate().unwrap_err());
        assert_eq!(errors[0].field, "content");
        assert_eq!(errors[0].message, "Content must be at least 50 characters");
    }

    #[test]
    fn test_photo_deserializes_backend_payload() {
        let photo: Photo = serde_json::from_str(
            r#"{"id":3,"title":"Studio","description":null,"imageUrl":"https://x.test/p.jpg",
               "thumbnailUrl":null,"category":"portrait","displayOrder":2,"isActive":true,
               "createdAt":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(photo.category.as_deref(), Some("portrait"));
        assert_eq!(photo.display_order, 2);
    }
}
