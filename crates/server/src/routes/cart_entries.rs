//! Cart entry route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use restcart_core::{CartEntryId, ItemId, UserId};

use crate::db::cart_entries::CartEntryRepository;
use crate::error::{AppError, Result};
use crate::middleware::BasicAuth;
use crate::models::{CartEntryUpdate, NewCartEntry};
use crate::routes::{ApiJson, ApiPath};
use crate::state::AppState;

/// Cart entry creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartEntryRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl TryFrom<CreateCartEntryRequest> for NewCartEntry {
    type Error = AppError;

    fn try_from(body: CreateCartEntryRequest) -> std::result::Result<Self, Self::Error> {
        let missing = |field: &str| AppError::BadRequest(format!("{field} required"));
        Ok(Self {
            user_id: body.user_id.ok_or_else(|| missing("userId"))?,
            item_id: body.item_id.ok_or_else(|| missing("itemId"))?,
            quantity: body.quantity.ok_or_else(|| missing("quantity"))?,
        })
    }
}

/// Response carrying a cart entry id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntryIdResponse {
    pub cart_entry_id: CartEntryId,
}

/// Add an item to a user's cart.
///
/// A second entry for the same (user, item) pair, a non-positive quantity, or
/// an unknown user or item is a 409.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiJson(body): ApiJson<CreateCartEntryRequest>,
) -> Result<Json<CartEntryIdResponse>> {
    let entry = NewCartEntry::try_from(body)?;
    let cart_entry_id = CartEntryRepository::new(state.pool()).create(entry).await?;

    tracing::info!(
        %cart_entry_id,
        user_id = %entry.user_id,
        item_id = %entry.item_id,
        quantity = entry.quantity,
        "cart entry created"
    );
    Ok(Json(CartEntryIdResponse { cart_entry_id }))
}

/// Update the fields present in the body.
#[instrument(skip_all, fields(cart_entry_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<CartEntryId>,
    ApiJson(update): ApiJson<CartEntryUpdate>,
) -> Result<Json<CartEntryIdResponse>> {
    let affected = CartEntryRepository::new(state.pool())
        .update(id, update)
        .await?;
    if affected == 0 {
        return Err(AppError::NotFound("cart entry"));
    }
    Ok(Json(CartEntryIdResponse { cart_entry_id: id }))
}

/// Delete a cart entry.
///
/// Deleting an id that does not exist still succeeds.
#[instrument(skip_all, fields(cart_entry_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<CartEntryId>,
) -> Result<Json<CartEntryIdResponse>> {
    let affected = CartEntryRepository::new(state.pool()).delete(id).await?;
    tracing::debug!(affected, "cart entry delete");
    Ok(Json(CartEntryIdResponse { cart_entry_id: id }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_into_new_entry() {
        let body: CreateCartEntryRequest =
            serde_json::from_str(r#"{"userId": 1, "itemId": 2, "quantity": 3}"#).unwrap();
        assert_eq!(
            NewCartEntry::try_from(body).unwrap(),
            NewCartEntry {
                user_id: UserId::new(1),
                item_id: ItemId::new(2),
                quantity: 3,
            }
        );
    }

    #[test]
    fn test_create_request_names_missing_field() {
        let body: CreateCartEntryRequest =
            serde_json::from_str(r#"{"userId": 1, "quantity": 3}"#).unwrap();
        let err = NewCartEntry::try_from(body).unwrap_err();
        assert_eq!(err.to_string(), "itemId required");
    }

    #[test]
    fn test_id_response_shape() {
        let json = serde_json::to_value(CartEntryIdResponse {
            cart_entry_id: CartEntryId::new(4),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "cartEntryId": 4 }));
    }
}
