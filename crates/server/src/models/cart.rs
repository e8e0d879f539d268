//! Priced cart view of a user.

use serde::Serialize;

use restcart_core::{CartEntryId, EuroCents, ItemId};

use super::User;

/// One priced line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Cart entry ID.
    pub id: CartEntryId,
    /// Item name.
    pub name: String,
    pub quantity: i32,
    /// Unit price of the item.
    pub item_price_euro_cent: EuroCents,
    pub item_id: ItemId,
    /// `item_price_euro_cent * quantity`.
    pub entry_price_euro_cent: EuroCents,
}

/// A user together with their priced cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCart {
    #[serde(flatten)]
    pub user: User,
    /// Sum of all line totals.
    pub total_price_euro_cent: EuroCents,
    /// Lines in cart-entry storage order.
    pub cart: Vec<CartLine>,
}
