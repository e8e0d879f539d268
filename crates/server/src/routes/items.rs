//! Catalog item route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use restcart_core::{EuroCents, ItemId};

use crate::db::items::ItemRepository;
use crate::error::{AppError, Result};
use crate::middleware::BasicAuth;
use crate::models::{Item, ItemUpdate, NewItem};
use crate::routes::{ApiJson, ApiPath};
use crate::state::AppState;

/// Item creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_euro_cent: Option<EuroCents>,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = AppError;

    fn try_from(body: CreateItemRequest) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            name: body
                .name
                .ok_or_else(|| AppError::BadRequest("name required".to_string()))?,
            price_euro_cent: body
                .price_euro_cent
                .ok_or_else(|| AppError::BadRequest("priceEuroCent required".to_string()))?,
        })
    }
}

/// Response carrying an item id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdResponse {
    pub item_id: ItemId,
}

/// Create an item.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiJson(body): ApiJson<CreateItemRequest>,
) -> Result<Json<ItemIdResponse>> {
    let item = NewItem::try_from(body)?;
    let item_id = ItemRepository::new(state.pool()).create(&item).await?;

    tracing::info!(%item_id, name = %item.name, "item created");
    Ok(Json(ItemIdResponse { item_id }))
}

/// List all items in id order.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
) -> Result<Json<Vec<Item>>> {
    let items = ItemRepository::new(state.pool()).list().await?;
    Ok(Json(items))
}

/// Get one item.
#[instrument(skip_all, fields(item_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<ItemId>,
) -> Result<Json<Item>> {
    let item = ItemRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("item"))?;
    Ok(Json(item))
}

/// Update the fields present in the body.
#[instrument(skip_all, fields(item_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<ItemId>,
    ApiJson(update): ApiJson<ItemUpdate>,
) -> Result<Json<ItemIdResponse>> {
    let affected = ItemRepository::new(state.pool()).update(id, update).await?;
    if affected == 0 {
        return Err(AppError::NotFound("item"));
    }
    Ok(Json(ItemIdResponse { item_id: id }))
}

/// Delete an item. Cart entries that reference it go with it.
///
/// Deleting an id that does not exist still succeeds.
#[instrument(skip_all, fields(item_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    BasicAuth(_caller): BasicAuth,
    ApiPath(id): ApiPath<ItemId>,
) -> Result<Json<ItemIdResponse>> {
    let affected = ItemRepository::new(state.pool()).delete(id).await?;
    tracing::debug!(affected, "item delete");
    Ok(Json(ItemIdResponse { item_id: id }))
}
