//! Authentication payloads exchanged with the auth backend

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::not_blank;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "not_blank", message = "Username is required"),
        length(max = 50, message = "Username cannot exceed 50 characters")
    )]
    pub username: String,
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Body returned by both login and register on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: String,
}
