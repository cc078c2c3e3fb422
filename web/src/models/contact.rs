//! Contact form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use validator::Validate;

use super::validation::{not_blank, phone_number};

/// Sent by the public contact form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionCreate {
    #[validate(
        custom(function = "not_blank", message = "Please enter your full name"),
        length(max = 100, message = "Name cannot exceed 100 characters")
    )]
    pub full_name: String,
    #[validate(
        custom(function = "not_blank", message = "Please enter your email address"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "phone_number", message = "Please enter a valid phone number"))]
    pub phone: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Please enter a subject"),
        length(max = 200, message = "Subject cannot exceed 200 characters")
    )]
    pub subject: String,
    #[validate(
        custom(function = "not_blank", message = "Please enter your message"),
        length(min = 10, message = "Message must be at least 10 characters")
    )]
    pub message: String,
}

/// A stored submission, as listed for administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}
