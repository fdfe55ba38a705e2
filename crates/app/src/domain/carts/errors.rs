//! Carts service errors.

use thiserror::Error;

use crate::domain::{
    carts::store::CartEntryStoreError,
    catalog::{CatalogError, ItemUuid},
    users::UsersError,
};

/// Request-scoped failures of cart operations.
///
/// Business-rule rejections are never reported here; they are returned as
/// [`CartMutationResult`](crate::domain::carts::CartMutationResult) codes.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart entry not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("item {0} is not in the catalog")]
    UnknownItem(ItemUuid),

    #[error("cart references item {0} missing from the catalog")]
    MissingCatalogItem(ItemUuid),

    #[error("gave up after repeated concurrent update conflicts")]
    Contention,

    #[error("quantity out of range")]
    QuantityOutOfRange,

    #[error("cart storage error")]
    Storage(#[source] CartEntryStoreError),

    #[error("catalog error")]
    Catalog(#[source] CatalogError),

    #[error("users error")]
    Users(#[from] UsersError),
}

impl From<CartEntryStoreError> for CartsServiceError {
    fn from(error: CartEntryStoreError) -> Self {
        match error {
            CartEntryStoreError::NotFound => Self::NotFound,
            CartEntryStoreError::Conflict => Self::Contention,
            CartEntryStoreError::QuantityAboveMaximum => Self::QuantityOutOfRange,
            other => Self::Storage(other),
        }
    }
}

impl From<CatalogError> for CartsServiceError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::ItemNotFound(item) => Self::MissingCatalogItem(item),
            other => Self::Catalog(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_item_is_reported_by_uuid() {
        let item = ItemUuid::new();

        let error = CartsServiceError::from(CatalogError::ItemNotFound(item));

        assert!(
            matches!(error, CartsServiceError::MissingCatalogItem(missing) if missing == item),
            "expected MissingCatalogItem, got {error:?}"
        );
    }

    #[test]
    fn store_conflict_is_contention() {
        let error = CartsServiceError::from(CartEntryStoreError::Conflict);

        assert!(
            matches!(error, CartsServiceError::Contention),
            "expected Contention, got {error:?}"
        );
    }
}
