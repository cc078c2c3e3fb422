//! Data transfer objects exchanged with the backend

pub mod auth;
pub mod contact;
pub mod content;
pub mod validation;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use contact::{ContactSubmission, ContactSubmissionCreate};
pub use content::{
    AboutUs, AboutUsUpdate, Photo, PhotoCreate, Promo, PromoCreate, Video, VideoCreate,
};
pub use validation::{FieldError, field_errors};
pub use validator::Validate;
