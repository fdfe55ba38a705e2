//! Catalog Repository

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    catalog::{
        errors::CatalogError,
        models::{Item, ItemUuid},
    },
    users::UserUuid,
};

const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const GET_DISCOUNT_RATE_SQL: &str = include_str!("sql/get_discount_rate.sql");

#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn get_item(&self, item: ItemUuid) -> Result<Item, CatalogError> {
        query_as::<Postgres, Item>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CatalogError::ItemNotFound(item))
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn price_of(&self, item: ItemUuid) -> Result<Decimal, CatalogError> {
        Ok(self.get_item(item).await?.price)
    }

    async fn discounted_price(
        &self,
        item: ItemUuid,
        discount_rate: Decimal,
    ) -> Result<Decimal, CatalogError> {
        Ok(self.get_item(item).await?.discounted_price(discount_rate))
    }

    async fn discount_rate_of(&self, user: UserUuid) -> Result<Decimal, CatalogError> {
        query_scalar::<Postgres, Decimal>(GET_DISCOUNT_RATE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CatalogError::UserNotFound(user))
    }
}

impl<'r> FromRow<'r, PgRow> for Item {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ItemUuid::from_uuid(row.try_get("uuid")?),
            price: row.try_get("price")?,
            discountable: row.try_get("discountable")?,
        })
    }
}

/// Read port onto the item catalog and user discount rates.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Base price of an item.
    async fn price_of(&self, item: ItemUuid) -> Result<Decimal, CatalogError>;

    /// Price of an item after applying the given discount rate.
    async fn discounted_price(
        &self,
        item: ItemUuid,
        discount_rate: Decimal,
    ) -> Result<Decimal, CatalogError>;

    /// Discount rate granted to a user.
    async fn discount_rate_of(&self, user: UserUuid) -> Result<Decimal, CatalogError>;
}
