//! Cart Entry Stores

mod errors;
mod memory;
mod postgres;

use async_trait::async_trait;
use mockall::automock;

pub use errors::CartEntryStoreError;
pub use memory::MemoryCartEntryStore;
pub use postgres::PgCartEntryStore;

use crate::domain::{
    carts::models::{CartEntry, CartEntryUuid, NewCartEntry},
    catalog::ItemUuid,
    users::UserUuid,
};

/// Largest quantity a single entry may hold.
pub const MAX_QUANTITY: u32 = 2_147_483_647;

/// Durable mapping of `(user, item)` to quantity.
///
/// Implementations guarantee that `create` checks uniqueness and inserts in
/// one atomic step, and that `adjust_quantity` is a single atomic
/// read-modify-write per pair.
#[automock]
#[async_trait]
pub trait CartEntryStore: Send + Sync {
    /// Entry for a user and item, if any.
    async fn find(
        &self,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError>;

    /// Entry by its own identifier, if any.
    async fn find_by_uuid(
        &self,
        entry: CartEntryUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError>;

    /// Create a new entry; fails with `DuplicateEntry` when the pair already has one.
    async fn create(&self, entry: NewCartEntry) -> Result<CartEntry, CartEntryStoreError>;

    /// Apply `delta` to the pair's quantity; fails with `QuantityBelowMinimum`
    /// rather than letting it drop under one.
    async fn adjust_quantity(
        &self,
        user: UserUuid,
        item: ItemUuid,
        delta: i32,
    ) -> Result<CartEntry, CartEntryStoreError>;

    /// Delete an entry regardless of quantity; `NotFound` when absent.
    async fn remove(&self, entry: CartEntryUuid) -> Result<(), CartEntryStoreError>;

    /// All entries owned by a user.
    async fn list_by_user(&self, user: UserUuid) -> Result<Vec<CartEntry>, CartEntryStoreError>;

    /// Every entry of every user.
    async fn list_all(&self) -> Result<Vec<CartEntry>, CartEntryStoreError>;
}
