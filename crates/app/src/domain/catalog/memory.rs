//! In-memory catalog.

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::domain::{
    catalog::{
        Catalog,
        errors::CatalogError,
        models::{Item, ItemUuid},
    },
    users::UserUuid,
};

/// Items and discount rates held in process memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: DashMap<ItemUuid, Item>,
    discount_rates: DashMap<UserUuid, Decimal>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item.
    pub fn insert_item(&self, item: Item) {
        self.items.insert(item.uuid, item);
    }

    /// Drop an item, as if it were deleted out-of-band.
    pub fn remove_item(&self, item: ItemUuid) {
        self.items.remove(&item);
    }

    /// Set the discount rate for a user.
    pub fn set_discount_rate(&self, user: UserUuid, rate: Decimal) {
        self.discount_rates.insert(user, rate);
    }

    fn get_item(&self, item: ItemUuid) -> Result<Item, CatalogError> {
        self.items
            .get(&item)
            .map(|entry| entry.value().clone())
            .ok_or(CatalogError::ItemNotFound(item))
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn price_of(&self, item: ItemUuid) -> Result<Decimal, CatalogError> {
        Ok(self.get_item(item)?.price)
    }

    async fn discounted_price(
        &self,
        item: ItemUuid,
        discount_rate: Decimal,
    ) -> Result<Decimal, CatalogError> {
        Ok(self.get_item(item)?.discounted_price(discount_rate))
    }

    async fn discount_rate_of(&self, user: UserUuid) -> Result<Decimal, CatalogError> {
        self.discount_rates
            .get(&user)
            .map(|entry| *entry.value())
            .ok_or(CatalogError::UserNotFound(user))
    }
}
