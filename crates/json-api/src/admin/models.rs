//! Admin response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartEntry;

/// Cart Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminCartEntryResponse {
    pub uuid: Uuid,

    /// Owner of the cart
    pub user_uuid: Uuid,

    pub item_uuid: Uuid,

    pub quantity: u32,

    /// RFC 3339 timestamp
    pub created_at: String,

    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl From<CartEntry> for AdminCartEntryResponse {
    fn from(entry: CartEntry) -> Self {
        Self {
            uuid: entry.uuid.into(),
            user_uuid: entry.user_uuid.into(),
            item_uuid: entry.item_uuid.into(),
            quantity: entry.quantity,
            created_at: entry.created_at.to_string(),
            updated_at: entry.updated_at.to_string(),
        }
    }
}
