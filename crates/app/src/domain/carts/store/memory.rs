//! In-memory cart entry store.

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use jiff::Timestamp;

use crate::domain::{
    carts::{
        models::{CartEntry, CartEntryUuid, NewCartEntry},
        store::{CartEntryStore, CartEntryStoreError, MAX_QUANTITY},
    },
    catalog::ItemUuid,
    users::UserUuid,
};

type EntryKey = (UserUuid, ItemUuid);

/// Cart entries keyed by `(user, item)`.
///
/// The map is sharded, so operations on different pairs proceed in parallel
/// while each pair's read-modify-write holds its shard lock for the duration.
#[derive(Debug, Default)]
pub struct MemoryCartEntryStore {
    entries: DashMap<EntryKey, CartEntry>,
}

impl MemoryCartEntryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key_of(&self, entry: CartEntryUuid) -> Option<EntryKey> {
        self.entries
            .iter()
            .find(|candidate| candidate.value().uuid == entry)
            .map(|candidate| *candidate.key())
    }
}

#[async_trait]
impl CartEntryStore for MemoryCartEntryStore {
    async fn find(
        &self,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError> {
        Ok(self
            .entries
            .get(&(user, item))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_uuid(
        &self,
        entry: CartEntryUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError> {
        let Some(key) = self.key_of(entry) else {
            return Ok(None);
        };

        Ok(self
            .entries
            .get(&key)
            .filter(|found| found.value().uuid == entry)
            .map(|found| found.value().clone()))
    }

    async fn create(&self, entry: NewCartEntry) -> Result<CartEntry, CartEntryStoreError> {
        if entry.quantity < 1 {
            return Err(CartEntryStoreError::QuantityBelowMinimum);
        }

        if entry.quantity > MAX_QUANTITY {
            return Err(CartEntryStoreError::QuantityAboveMaximum);
        }

        match self.entries.entry((entry.user_uuid, entry.item_uuid)) {
            Entry::Occupied(_) => Err(CartEntryStoreError::DuplicateEntry),
            Entry::Vacant(vacant) => {
                let now = Timestamp::now();

                let created = CartEntry {
                    uuid: entry.uuid,
                    user_uuid: entry.user_uuid,
                    item_uuid: entry.item_uuid,
                    quantity: entry.quantity,
                    created_at: now,
                    updated_at: now,
                };

                vacant.insert(created.clone());

                Ok(created)
            }
        }
    }

    async fn adjust_quantity(
        &self,
        user: UserUuid,
        item: ItemUuid,
        delta: i32,
    ) -> Result<CartEntry, CartEntryStoreError> {
        let mut entry = self
            .entries
            .get_mut(&(user, item))
            .ok_or(CartEntryStoreError::NotFound)?;

        let adjusted = i64::from(entry.quantity) + i64::from(delta);

        if adjusted < 1 {
            return Err(CartEntryStoreError::QuantityBelowMinimum);
        }

        if adjusted > i64::from(MAX_QUANTITY) {
            return Err(CartEntryStoreError::QuantityAboveMaximum);
        }

        entry.quantity =
            u32::try_from(adjusted).map_err(|_overflow| CartEntryStoreError::QuantityAboveMaximum)?;
        entry.updated_at = Timestamp::now();

        Ok(entry.value().clone())
    }

    async fn remove(&self, entry: CartEntryUuid) -> Result<(), CartEntryStoreError> {
        let key = self.key_of(entry).ok_or(CartEntryStoreError::NotFound)?;

        self.entries
            .remove_if(&key, |_, candidate| candidate.uuid == entry)
            .map(|_removed| ())
            .ok_or(CartEntryStoreError::NotFound)
    }

    async fn list_by_user(&self, user: UserUuid) -> Result<Vec<CartEntry>, CartEntryStoreError> {
        let mut entries: Vec<CartEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == user)
            .map(|entry| entry.value().clone())
            .collect();

        entries.sort_by_key(|entry| entry.uuid);

        Ok(entries)
    }

    async fn list_all(&self) -> Result<Vec<CartEntry>, CartEntryStoreError> {
        let mut entries: Vec<CartEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        entries.sort_by_key(|entry| (entry.user_uuid, entry.uuid));

        Ok(entries)
    }
}
