//! User route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use restcart_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::BasicAuth;
use crate::models::UserCart;
use crate::routes::{ApiJson, ApiPath};
use crate::services::auth::{AuthError, AuthService};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields are optional so that a missing one is a 400 with a clear message
/// rather than a JSON rejection.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response carrying a user id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub user_id: UserId,
}

/// Register a new user.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<UserIdResponse>> {
    let username = body
        .username
        .ok_or_else(|| AppError::BadRequest("username required".to_string()))?;
    let password = body.password.ok_or(AuthError::MissingPassword)?;

    let user_id = AuthService::new(state.pool(), state.verifier())
        .register(&username, &password)
        .await?;

    tracing::info!(%user_id, "user registered");
    Ok(Json(UserIdResponse { user_id }))
}

/// Get a user together with their priced cart.
#[instrument(skip_all, fields(user_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserCart>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let cart = CartService::new(state.pool()).user_cart(user).await?;
    Ok(Json(cart))
}

/// Delete a user. Their cart entries go with them.
///
/// Deleting an id that does not exist still succeeds.
#[instrument(skip_all, fields(user_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserIdResponse>> {
    let affected = UserRepository::new(state.pool()).delete(id).await?;
    tracing::debug!(affected, "user delete");
    Ok(Json(UserIdResponse { user_id: id }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_missing_fields() {
        let body: RegisterRequest = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(body.username.as_deref(), Some("alice"));
        assert!(body.password.is_none());
    }

    #[test]
    fn test_user_id_response_shape() {
        let json = serde_json::to_value(UserIdResponse {
            user_id: UserId::new(7),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "userId": 7 }));
    }
}
