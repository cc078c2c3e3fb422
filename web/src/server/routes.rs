//! HTTP route handlers for the front-end
//!
//! These are the endpoints the interactive pages call. Form bodies are
//! validated here, before any backend round trip.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::events::auth_events;
use super::state::AppState;
use crate::api::{ActionResult, ApiError};
use crate::models::{
    AboutUs, AboutUsUpdate, ContactSubmission, ContactSubmissionCreate, FieldError, LoginRequest,
    Photo, Promo, RegisterRequest, Validate, Video, field_errors,
};
use crate::services::{ContentResource, ListFilter};

/// Error response for front-end API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            error: "One or more fields are invalid".to_string(),
            code: "validation_failed".to_string(),
            fields,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(e: ApiError) -> Self {
        let code = match &e {
            ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND => "not_found",
            ApiError::Status { .. } | ApiError::Decode(_) => "backend_error",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::RateLimited { .. } => "rate_limited",
            ApiError::Transport(_) => "backend_unavailable",
        };
        Self {
            error: e.to_string(),
            code: code.to_string(),
            fields: Vec::new(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.code.as_str() {
            "validation_failed" => StatusCode::UNPROCESSABLE_ENTITY,
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "backend_unavailable" | "backend_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// 200 on success, 400 otherwise; the body is always the `ActionResult`
fn action_response(result: ActionResult) -> Response {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result)).into_response()
}

fn validated<T: Validate>(form: &T) -> Result<(), ErrorResponse> {
    form.validate()
        .map_err(|errors| ErrorResponse::validation(field_errors(&errors)))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Session
// ============================================================================

/// Response for GET /session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub username: Option<String>,
    pub role: Option<String>,
}

/// GET /session - who is signed in
pub async fn session_status(State(state): State<AppState>) -> Json<SessionStatus> {
    let status = match state.session.credential().await {
        Some(credential) => SessionStatus {
            authenticated: true,
            username: Some(credential.username),
            role: Some(credential.role),
        },
        None => SessionStatus {
            authenticated: false,
            username: None,
            role: None,
        },
    };
    Json(status)
}

/// POST /session/login
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Response, ErrorResponse> {
    validated(&form)?;
    Ok(action_response(state.session.login(&form).await))
}

/// POST /session/register
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterRequest>,
) -> Result<Response, ErrorResponse> {
    validated(&form)?;
    Ok(action_response(state.session.register(&form).await))
}

/// POST /session/logout
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}

// ============================================================================
// Contact
// ============================================================================

/// Query parameters for the inbox listing
#[derive(Debug, Default, Deserialize)]
pub struct InboxParams {
    #[serde(default)]
    pub unread_only: bool,
}

/// POST /contact - public contact form
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactSubmissionCreate>,
) -> Result<Response, ErrorResponse> {
    validated(&form)?;
    Ok(action_response(state.contact.submit(&form).await))
}

/// GET /contact - inbox listing
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<InboxParams>,
) -> Result<Json<Vec<ContactSubmission>>, ErrorResponse> {
    let submissions = state
        .contact
        .try_submissions(params.unread_only)
        .await
        .map_err(|e| {
            warn!("Failed to list contact submissions: {}", e);
            ErrorResponse::from(e)
        })?;
    Ok(Json(submissions))
}

/// GET /contact/:id
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactSubmission>, ErrorResponse> {
    let submission = state.contact.try_submission(id).await.map_err(|e| {
        warn!("Failed to get contact submission {}: {}", id, e);
        ErrorResponse::from(e)
    })?;
    Ok(Json(submission))
}

/// PUT /contact/:id/mark-read
pub async fn mark_submission_read(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    action_response(state.contact.mark_as_read(id).await)
}

/// DELETE /contact/:id
pub async fn delete_submission(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    action_response(state.contact.delete(id).await)
}

// ============================================================================
// Content
// ============================================================================

/// Query parameters for content listings
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub active_only: bool,
    pub category: Option<String>,
}

impl From<ListParams> for ListFilter {
    fn from(params: ListParams) -> Self {
        Self {
            active_only: params.active_only,
            category: params.category,
        }
    }
}

/// GET /{promos,photos,videos}
pub async fn list_content<R>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<R>>, ErrorResponse>
where
    R: ContentResource + Serialize,
{
    let filter = ListFilter::from(params);
    let items = state.content.try_list::<R>(&filter).await.map_err(|e| {
        warn!("Failed to list {}s: {}", R::NOUN, e);
        ErrorResponse::from(e)
    })?;
    Ok(Json(items))
}

/// GET /{promos,photos,videos}/:id
pub async fn get_content<R>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<R>, ErrorResponse>
where
    R: ContentResource + Serialize,
{
    let item = state.content.try_get::<R>(id).await.map_err(|e| {
        debug!("Failed to get {} {}: {}", R::NOUN, id, e);
        ErrorResponse::from(e)
    })?;
    Ok(Json(item))
}

/// POST /{promos,photos,videos}
pub async fn create_content<R>(
    State(state): State<AppState>,
    Json(form): Json<R::Create>,
) -> Result<Response, ErrorResponse>
where
    R: ContentResource,
    R::Create: Validate + DeserializeOwned,
{
    validated(&form)?;
    Ok(action_response(state.content.create::<R>(&form).await))
}

/// DELETE /{promos,photos,videos}/:id
pub async fn delete_content<R>(State(state): State<AppState>, Path(id): Path<i32>) -> Response
where
    R: ContentResource,
{
    action_response(state.content.delete::<R>(id).await)
}

/// GET /about
pub async fn get_about_us(State(state): State<AppState>) -> Result<Json<AboutUs>, ErrorResponse> {
    let about = state.content.try_about_us().await.map_err(|e| {
        warn!("Failed to get About Us: {}", e);
        ErrorResponse::from(e)
    })?;
    Ok(Json(about))
}

/// PUT /about
pub async fn update_about_us(
    State(state): State<AppState>,
    Json(form): Json<AboutUsUpdate>,
) -> Result<Response, ErrorResponse> {
    validated(&form)?;
    Ok(action_response(state.content.update_about_us(&form).await))
}

fn content_routes<R>() -> Router<AppState>
where
    R: ContentResource + Serialize,
    R::Create: Validate + DeserializeOwned,
{
    Router::new()
        .route("/", get(list_content::<R>).post(create_content::<R>))
        .route("/:id", get(get_content::<R>).delete(delete_content::<R>))
}

/// Build front-end routes
pub fn frontend_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session", get(session_status))
        .route("/session/login", post(login))
        .route("/session/register", post(register))
        .route("/session/logout", post(logout))
        .route("/session/events", get(auth_events))
        .route("/contact", post(submit_contact).get(list_submissions))
        .route("/contact/:id", get(get_submission).delete(delete_submission))
        .route("/contact/:id/mark-read", put(mark_submission_read))
        .nest("/promos", content_routes::<Promo>())
        .nest("/photos", content_routes::<Photo>())
        .nest("/videos", content_routes::<Video>())
        .route("/about", get(get_about_us).put(update_about_us))
        .with_state(state)
}
