//! Common Test Utilities for Integration Tests
//!
//! A mock of the three backend resource groups, served on an ephemeral
//! port, plus helpers wiring an `AppState` against it.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use studio_web::config::BackendConfig;
use studio_web::{AppState, MemoryStore, SessionStore};

pub const ADMIN_TOKEN: &str = "token-abc";
pub const UNAUTHORIZED_BODY: &str = "Authorization required";

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

/// Shared handle onto the running mock
#[derive(Clone, Default)]
pub struct MockBackend {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    fail_content: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most recent request to `path`
    pub fn last_request(&self, path: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }

    /// Make content listings answer 500
    pub fn fail_content(&self, fail: bool) {
        self.fail_content.store(fail, Ordering::SeqCst);
    }
}

async fn record(State(mock): State<MockBackend>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(String::from),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    };
    mock.requests.lock().unwrap().push(recorded);
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ADMIN_TOKEN))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "locked" {
        return (StatusCode::TOO_MANY_REQUESTS, "Locked for 5 minutes").into_response();
    }
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({ "token": ADMIN_TOKEN, "username": "admin", "role": "Admin" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (StatusCode::BAD_REQUEST, "Username already exists").into_response();
    }
    Json(json!({ "token": "token-new", "username": body["username"], "role": "User" }))
        .into_response()
}

fn submission(id: i32) -> Value {
    json!({
        "id": id,
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phone": null,
        "subject": "Wedding shoot",
        "message": "Are you available in June?",
        "isRead": false,
        "submittedAt": "2024-05-01T10:00:00Z",
        "readAt": null
    })
}

async fn submit_contact(Json(body): Json<Value>) -> Response {
    if body["fullName"] == "spammer" {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }
    (StatusCode::CREATED, Json(submission(7))).into_response()
}

async fn list_contact(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([submission(1)])).into_response()
}

async fn get_contact(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == 1 {
        Json(submission(1)).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Submission not found").into_response()
    }
}

async fn protected_no_content(headers: HeaderMap) -> Response {
    if authorized(&headers) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        unauthorized()
    }
}

fn promo(id: i32) -> Value {
    json!({
        "id": id,
        "title": "Spring sale",
        "description": null,
        "imageUrl": "https://cdn.example.com/spring.jpg",
        "displayOrder": 0,
        "isActive": true,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": null
    })
}

async fn list_promos(State(mock): State<MockBackend>) -> Response {
    if mock.fail_content.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(json!([promo(1)])).into_response()
}

async fn get_promo(Path(id): Path<i32>) -> Response {
    if id == 1 {
        Json(promo(1)).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Promo not found").into_response()
    }
}

async fn create_promo(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["title"].as_str().is_none_or(str::is_empty) {
        return (StatusCode::BAD_REQUEST, "Title is required").into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

async fn about_us() -> Json<Value> {
    Json(json!({
        "id": 1,
        "content": "We are a small studio.",
        "imageUrl": null,
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
}

fn router(mock: MockBackend) -> Router {
    Router::new()
        .route("/api/Auth/login", post(login))
        .route("/api/Auth/register", post(register))
        .route("/api/Contact", post(submit_contact).get(list_contact))
        .route(
            "/api/Contact/:id",
            get(get_contact).delete(protected_no_content),
        )
        .route("/api/Contact/:id/mark-read", put(protected_no_content))
        .route("/api/Promos", get(list_promos).post(create_promo))
        .route(
            "/api/Promos/:id",
            get(get_promo).delete(protected_no_content),
        )
        .route("/api/Photos", get(empty_list))
        .route("/api/Videos", get(empty_list))
        .route("/api/AboutUs", get(about_us).put(protected_no_content))
        .layer(middleware::from_fn_with_state(mock.clone(), record))
        .with_state(mock)
}

/// Serve the mock on an ephemeral port; returns its handle and base URL
pub async fn spawn_backend() -> (MockBackend, String) {
    let mock = MockBackend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(mock.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (mock, format!("http://{}", addr))
}

/// Every resource group served from the same base URL
pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        auth_url: base_url.to_string(),
        content_url: base_url.to_string(),
        communication_url: base_url.to_string(),
        request_timeout: None,
    }
}

pub fn app_state_with_store(base_url: &str, store: Arc<dyn SessionStore>) -> AppState {
    AppState::new(&backend_config(base_url), store).unwrap()
}

/// Mock backend plus a fresh in-memory session against it
pub async fn test_app_state() -> (MockBackend, AppState) {
    let (mock, base_url) = spawn_backend().await;
    let state = app_state_with_store(&base_url, Arc::new(MemoryStore::new()));
    (mock, state)
}

pub fn admin_login() -> studio_web::models::LoginRequest {
    studio_web::models::LoginRequest {
        username: "admin".to_string(),
        password: "secret".to_string(),
    }
}
