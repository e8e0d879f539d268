//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database ping)
//!
//! # Users
//! POST   /v1/users                - Register (no auth)
//! GET    /v1/users/{id}           - User with priced cart
//! DELETE /v1/users/{id}           - Delete user and their cart
//!
//! # Items
//! POST   /v1/items                - Create item
//! GET    /v1/items                - List items
//! GET    /v1/items/{id}           - Get item
//! PATCH  /v1/items/{id}           - Partial update
//! DELETE /v1/items/{id}           - Delete item and dependent cart entries
//!
//! # Cart entries
//! POST   /v1/cartEntries          - Create cart entry
//! PATCH  /v1/cartEntries/{id}     - Partial update
//! DELETE /v1/cartEntries/{id}     - Delete cart entry
//! ```
//!
//! Every `/v1` route except registration requires HTTP Basic credentials.

pub mod cart_entries;
pub mod health;
pub mod items;
pub mod users;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::{get, patch, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejections are `AppError::BadRequest`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections are `AppError::BadRequest`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{id}", get(users::show).delete(users::delete))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index).post(items::create))
        .route(
            "/{id}",
            get(items::show).patch(items::update).delete(items::delete),
        )
}

/// Create the cart entry routes router.
pub fn cart_entry_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart_entries::create))
        .route(
            "/{id}",
            patch(cart_entries::update).delete(cart_entries::delete),
        )
}

/// Create the versioned API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/items", item_routes())
        .nest("/cartEntries", cart_entry_routes())
}

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/v1", api_routes())
}
