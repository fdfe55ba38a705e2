//! Catalog errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{catalog::models::ItemUuid, users::UserUuid};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("item {0} not found in catalog")]
    ItemNotFound(ItemUuid),

    #[error("user {0} not found in catalog")]
    UserNotFound(UserUuid),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
