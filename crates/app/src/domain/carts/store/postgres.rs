//! PostgreSQL cart entry store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            models::{CartEntry, CartEntryUuid, NewCartEntry},
            store::{CartEntryStore, CartEntryStoreError},
        },
        catalog::ItemUuid,
        users::UserUuid,
    },
};

const FIND_CART_ENTRY_SQL: &str = include_str!("sql/find_cart_entry.sql");
const GET_CART_ENTRY_SQL: &str = include_str!("sql/get_cart_entry.sql");
const CREATE_CART_ENTRY_SQL: &str = include_str!("sql/create_cart_entry.sql");
const ADJUST_CART_ENTRY_QUANTITY_SQL: &str = include_str!("sql/adjust_cart_entry_quantity.sql");
const DELETE_CART_ENTRY_SQL: &str = include_str!("sql/delete_cart_entry.sql");
const LIST_USER_CART_ENTRIES_SQL: &str = include_str!("sql/list_user_cart_entries.sql");
const LIST_CART_ENTRIES_SQL: &str = include_str!("sql/list_cart_entries.sql");

/// Cart entries persisted in the `cart_entries` table.
///
/// Uniqueness is enforced by the `(user_uuid, item_uuid)` constraint and
/// quantity adjustments are a single conditional `UPDATE`, so concurrent
/// requests on the same pair serialize on the row lock.
#[derive(Debug, Clone)]
pub struct PgCartEntryStore {
    db: Db,
}

impl PgCartEntryStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn find_in(
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<Option<CartEntry>, sqlx::Error> {
        query_as::<Postgres, CartEntry>(FIND_CART_ENTRY_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

#[async_trait]
impl CartEntryStore for PgCartEntryStore {
    async fn find(
        &self,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let entry = Self::find_in(&mut tx, user, item).await?;

        tx.commit().await?;

        Ok(entry)
    }

    async fn find_by_uuid(
        &self,
        entry: CartEntryUuid,
    ) -> Result<Option<CartEntry>, CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let found = query_as::<Postgres, CartEntry>(GET_CART_ENTRY_SQL)
            .bind(entry.into_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create(&self, entry: NewCartEntry) -> Result<CartEntry, CartEntryStoreError> {
        let quantity = i32::try_from(entry.quantity)
            .map_err(|_overflow| CartEntryStoreError::QuantityAboveMaximum)?;

        let mut tx = self.db.begin().await?;

        let created = query_as::<Postgres, CartEntry>(CREATE_CART_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.user_uuid.into_uuid())
            .bind(entry.item_uuid.into_uuid())
            .bind(quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn adjust_quantity(
        &self,
        user: UserUuid,
        item: ItemUuid,
        delta: i32,
    ) -> Result<CartEntry, CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let adjusted = query_as::<Postgres, CartEntry>(ADJUST_CART_ENTRY_QUANTITY_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .bind(delta)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(entry) = adjusted {
            tx.commit().await?;

            return Ok(entry);
        }

        // Nothing updated: either the pair has no entry or the delta would
        // take it below one.
        let existing = Self::find_in(&mut tx, user, item).await?;

        tx.rollback().await?;

        debug!(%user, %item, delta, exists = existing.is_some(), "quantity adjustment rejected");

        match existing {
            Some(_) => Err(CartEntryStoreError::QuantityBelowMinimum),
            None => Err(CartEntryStoreError::NotFound),
        }
    }

    async fn remove(&self, entry: CartEntryUuid) -> Result<(), CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_CART_ENTRY_SQL)
            .bind(entry.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(CartEntryStoreError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_by_user(&self, user: UserUuid) -> Result<Vec<CartEntry>, CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let entries = query_as::<Postgres, CartEntry>(LIST_USER_CART_ENTRIES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn list_all(&self) -> Result<Vec<CartEntry>, CartEntryStoreError> {
        let mut tx = self.db.begin().await?;

        let entries = query_as::<Postgres, CartEntry>(LIST_CART_ENTRIES_SQL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(entries)
    }
}

impl<'r> FromRow<'r, PgRow> for CartEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CartEntryUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            item_uuid: ItemUuid::from_uuid(row.try_get("item_uuid")?),
            quantity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{carts::store::MAX_QUANTITY, users::Role},
        test::TestDb,
    };

    fn new_entry(user: UserUuid, item: ItemUuid, quantity: u32) -> NewCartEntry {
        NewCartEntry {
            uuid: CartEntryUuid::new(),
            user_uuid: user,
            item_uuid: item,
            quantity,
        }
    }

    async fn setup() -> TestResult<(TestDb, PgCartEntryStore, UserUuid)> {
        let db = TestDb::new().await?;
        let user = db.insert_user(&[Role::User], Decimal::ZERO).await?;
        let store = PgCartEntryStore::new(db.db());

        Ok((db, store, user))
    }

    async fn quantity_of(store: &PgCartEntryStore, user: UserUuid, item: ItemUuid) -> TestResult<u32> {
        let entry = store.find(user, item).await?.ok_or("expected cart entry")?;

        Ok(entry.quantity)
    }

    #[tokio::test]
    async fn create_then_find_round_trips() -> TestResult {
        let (_db, store, user) = setup().await?;
        let item = ItemUuid::new();
        let new = new_entry(user, item, 4);

        let created = store.create(new.clone()).await?;

        assert_eq!(created.uuid, new.uuid);
        assert_eq!(created.quantity, 4);
        assert_eq!(store.find(user, item).await?, Some(created.clone()));
        assert_eq!(store.find_by_uuid(new.uuid).await?, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn second_create_for_pair_is_duplicate() -> TestResult {
        let (_db, store, user) = setup().await?;
        let item = ItemUuid::new();

        store.create(new_entry(user, item, 2)).await?;

        let result = store.create(new_entry(user, item, 7)).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::DuplicateEntry)),
            "expected DuplicateEntry, got {result:?}"
        );
        assert_eq!(quantity_of(&store, user, item).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_unknown_reference() -> TestResult {
        let (_db, store, _user) = setup().await?;

        let result = store.create(new_entry(UserUuid::new(), ItemUuid::new(), 1)).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::UnknownReference)),
            "expected UnknownReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn decrement_at_one_is_rejected_and_unchanged() -> TestResult {
        let (_db, store, user) = setup().await?;
        let item = ItemUuid::new();

        store.create(new_entry(user, item, 1)).await?;

        let result = store.adjust_quantity(user, item, -1).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::QuantityBelowMinimum)),
            "expected QuantityBelowMinimum, got {result:?}"
        );
        assert_eq!(quantity_of(&store, user, item).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn adjusting_missing_pair_is_not_found() -> TestResult {
        let (_db, store, user) = setup().await?;

        let result = store.adjust_quantity(user, ItemUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adjusting_past_integer_range_is_above_maximum() -> TestResult {
        let (_db, store, user) = setup().await?;
        let item = ItemUuid::new();

        store.create(new_entry(user, item, MAX_QUANTITY)).await?;

        let result = store.adjust_quantity(user, item, 1).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::QuantityAboveMaximum)),
            "expected QuantityAboveMaximum, got {result:?}"
        );
        assert_eq!(quantity_of(&store, user, item).await?, MAX_QUANTITY);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_increments_are_both_applied() -> TestResult {
        let (_db, store, user) = setup().await?;
        let item = ItemUuid::new();

        store.create(new_entry(user, item, 3)).await?;

        let (first, second) = tokio::join!(
            store.adjust_quantity(user, item, 1),
            store.adjust_quantity(user, item, 1),
        );

        first?;
        second?;

        assert_eq!(quantity_of(&store, user, item).await?, 5);

        Ok(())
    }

    #[tokio::test]
    async fn removing_twice_reports_not_found() -> TestResult {
        let (_db, store, user) = setup().await?;
        let created = store.create(new_entry(user, ItemUuid::new(), 6)).await?;

        store.remove(created.uuid).await?;

        let result = store.remove(created.uuid).await;

        assert!(
            matches!(result, Err(CartEntryStoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(store.find_by_uuid(created.uuid).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn listings_are_scoped_by_user() -> TestResult {
        let (db, store, user) = setup().await?;
        let other = db.insert_user(&[Role::User], Decimal::ZERO).await?;

        let mine = store.create(new_entry(user, ItemUuid::new(), 1)).await?;
        let theirs = store.create(new_entry(other, ItemUuid::new(), 2)).await?;

        assert_eq!(store.list_by_user(user).await?, vec![mine.clone()]);

        let mut all: Vec<_> = store
            .list_all()
            .await?
            .into_iter()
            .map(|entry| entry.uuid)
            .collect();

        all.sort();

        let mut expected = vec![mine.uuid, theirs.uuid];

        expected.sort();

        assert_eq!(all, expected);

        Ok(())
    }
}
