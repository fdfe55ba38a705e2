//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{catalog::ItemUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart Entry UUID
pub type CartEntryUuid = TypedUuid<CartEntry>;

/// Cart Entry Model
///
/// At most one entry exists per `(user_uuid, item_uuid)` pair and its
/// quantity is always at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub uuid: CartEntryUuid,
    pub user_uuid: UserUuid,
    pub item_uuid: ItemUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Entry Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartEntry {
    pub uuid: CartEntryUuid,
    pub user_uuid: UserUuid,
    pub item_uuid: ItemUuid,
    pub quantity: u32,
}
