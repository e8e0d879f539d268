//! HTTP Basic authentication extractor.
//!
//! Every route except registration requires a valid `Authorization: Basic`
//! header. Malformed credential material is rejected here, before the access
//! gate is consulted; well-formed credentials go through
//! [`AuthService::authenticate`].

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};

use restcart_core::Username;

use crate::error::AppError;
use crate::models::AuthenticatedUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires valid HTTP Basic credentials.
///
/// Rejects with 401 when the header is missing or malformed, or when the
/// credentials do not match a stored user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     BasicAuth(user): BasicAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct BasicAuth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for BasicAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (username, password) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic_credentials)
            .ok_or(AppError::Unauthorized)?;

        let auth = AuthService::new(state.pool(), state.verifier());
        if !auth.authenticate(&username, &password).await? {
            tracing::debug!(%username, "basic authentication rejected");
            return Err(AppError::Unauthorized);
        }

        let username = Username::parse(&username).map_err(|_| AppError::Unauthorized)?;
        Ok(Self(AuthenticatedUser { username }))
    }
}

/// Decode an `Authorization` header value into a username/password pair.
///
/// The scheme name is matched case-insensitively. The decoded credential is
/// split on the first `:`, so passwords may contain colons. Returns `None`
/// for any other scheme, invalid base64 or UTF-8, a missing separator, or an
/// empty username or password.
#[must_use]
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }

    Some((username.to_owned(), password.to_owned()))
}
