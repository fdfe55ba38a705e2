//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info, warn};

use crate::{
    auth::Principal,
    domain::{
        carts::{
            errors::CartsServiceError,
            guard::{Authorization, authorize},
            models::{CartEntry, CartEntryUuid, NewCartEntry},
            results::{CartErrorCode, CartMutationResult},
            store::{CartEntryStore, CartEntryStoreError, MAX_QUANTITY},
            totals,
        },
        catalog::{Catalog, CatalogError, ItemUuid},
        users::{UserUuid, UsersRepository},
    },
};

/// Times a quantity adjustment is attempted before giving up on conflicts.
pub const MAX_ADJUST_ATTEMPTS: usize = 2;

/// Cart mutation engine and total aggregator over pluggable ports.
#[derive(Clone)]
pub struct CartsEngine {
    entries: Arc<dyn CartEntryStore>,
    users: Arc<dyn UsersRepository>,
    catalog: Arc<dyn Catalog>,
}

impl CartsEngine {
    #[must_use]
    pub fn new(
        entries: Arc<dyn CartEntryStore>,
        users: Arc<dyn UsersRepository>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            entries,
            users,
            catalog,
        }
    }

    async fn resolve_target(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
    ) -> Result<Authorization, CartsServiceError> {
        let outcome = authorize(principal, target, self.users.as_ref()).await?;

        if let Authorization::Allowed(user) = outcome {
            Span::current().record("target_uuid", tracing::field::display(user));
        }

        Ok(outcome)
    }

    async fn step_quantity(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
        delta: i32,
    ) -> Result<CartMutationResult, CartsServiceError> {
        let user = match self.resolve_target(principal, target).await? {
            Authorization::Allowed(user) => user,
            Authorization::Denied(code) => return Ok(CartMutationResult::rejected(code)),
        };

        let Some(entry) = self.entries.find(user, item).await? else {
            return Ok(CartMutationResult::rejected(
                CartErrorCode::CartItemNotFound,
            ));
        };

        if delta < 0 && entry.quantity == 1 {
            return Ok(CartMutationResult::rejected(
                CartErrorCode::CountBelowMinimum,
            ));
        }

        self.adjust_with_retry(user, item, delta).await
    }

    async fn adjust_with_retry(
        &self,
        user: UserUuid,
        item: ItemUuid,
        delta: i32,
    ) -> Result<CartMutationResult, CartsServiceError> {
        for attempt in 1..=MAX_ADJUST_ATTEMPTS {
            match self.entries.adjust_quantity(user, item, delta).await {
                Ok(entry) => {
                    info!(
                        entry_uuid = %entry.uuid,
                        quantity = entry.quantity,
                        "adjusted cart entry quantity"
                    );

                    return Ok(CartMutationResult::ok());
                }
                Err(CartEntryStoreError::Conflict) => {
                    warn!(attempt, "conflict adjusting cart entry quantity");
                }
                Err(CartEntryStoreError::NotFound) => {
                    return Ok(CartMutationResult::rejected(
                        CartErrorCode::CartItemNotFound,
                    ));
                }
                Err(CartEntryStoreError::QuantityBelowMinimum) => {
                    return Ok(CartMutationResult::rejected(
                        CartErrorCode::CountBelowMinimum,
                    ));
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(CartsServiceError::Contention)
    }
}

impl Debug for CartsEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartsEngine").finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for CartsEngine {
    #[tracing::instrument(
        name = "carts.service.add_item_for_user",
        skip_all,
        fields(
            principal_uuid = %principal.user,
            target_uuid = tracing::field::Empty,
            item_uuid = %item,
            quantity = quantity
        ),
        err
    )]
    async fn add_item_for_user(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
        quantity: i64,
    ) -> Result<CartMutationResult, CartsServiceError> {
        let user = match self.resolve_target(principal, target).await? {
            Authorization::Allowed(user) => user,
            Authorization::Denied(code) => return Ok(CartMutationResult::rejected(code)),
        };

        if quantity < 1 {
            return Ok(CartMutationResult::rejected(
                CartErrorCode::CountBelowMinimum,
            ));
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= MAX_QUANTITY)
            .ok_or(CartsServiceError::QuantityOutOfRange)?;

        // Existing lines are duplicates even if the item has left the catalog.
        if self.entries.find(user, item).await?.is_some() {
            return Ok(CartMutationResult::rejected(CartErrorCode::DuplicateEntry));
        }

        match self.catalog.price_of(item).await {
            Ok(_) => {}
            Err(CatalogError::ItemNotFound(item)) => {
                return Err(CartsServiceError::UnknownItem(item));
            }
            Err(error) => return Err(error.into()),
        }

        let created = self
            .entries
            .create(NewCartEntry {
                uuid: CartEntryUuid::new(),
                user_uuid: user,
                item_uuid: item,
                quantity,
            })
            .await;

        match created {
            Ok(entry) => {
                info!(entry_uuid = %entry.uuid, "created cart entry");

                Ok(CartMutationResult::ok())
            }
            Err(CartEntryStoreError::DuplicateEntry) => Ok(CartMutationResult::rejected(
                CartErrorCode::DuplicateEntry,
            )),
            Err(CartEntryStoreError::QuantityBelowMinimum) => Ok(CartMutationResult::rejected(
                CartErrorCode::CountBelowMinimum,
            )),
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(
        name = "carts.service.increment_item_count",
        skip_all,
        fields(
            principal_uuid = %principal.user,
            target_uuid = tracing::field::Empty,
            item_uuid = %item
        ),
        err
    )]
    async fn increment_item_count(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
    ) -> Result<CartMutationResult, CartsServiceError> {
        self.step_quantity(principal, target, item, 1).await
    }

    #[tracing::instrument(
        name = "carts.service.decrement_item_count",
        skip_all,
        fields(
            principal_uuid = %principal.user,
            target_uuid = tracing::field::Empty,
            item_uuid = %item
        ),
        err
    )]
    async fn decrement_item_count(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
    ) -> Result<CartMutationResult, CartsServiceError> {
        self.step_quantity(principal, target, item, -1).await
    }

    #[tracing::instrument(
        name = "carts.service.remove_entry",
        skip_all,
        fields(principal_uuid = %principal.user, entry_uuid = %entry),
        err
    )]
    async fn remove_entry(
        &self,
        principal: &Principal,
        entry: CartEntryUuid,
    ) -> Result<(), CartsServiceError> {
        let found = self
            .entries
            .find_by_uuid(entry)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        // Entries of other users are reported as absent.
        if found.user_uuid != principal.user && !principal.roles.is_admin() {
            return Err(CartsServiceError::NotFound);
        }

        self.entries.remove(entry).await?;

        info!(user_uuid = %found.user_uuid, "removed cart entry");

        Ok(())
    }

    async fn shopping_details(
        &self,
        principal: &Principal,
    ) -> Result<Vec<CartEntry>, CartsServiceError> {
        Ok(self.entries.list_by_user(principal.user).await?)
    }

    #[tracing::instrument(
        name = "carts.service.total",
        skip_all,
        fields(principal_uuid = %principal.user),
        err
    )]
    async fn total(&self, principal: &Principal) -> Result<Decimal, CartsServiceError> {
        let entries = self.entries.list_by_user(principal.user).await?;

        totals::total_for(self.catalog.as_ref(), principal.user, &entries).await
    }

    async fn list_entries(
        &self,
        principal: &Principal,
    ) -> Result<Vec<CartEntry>, CartsServiceError> {
        if !principal.roles.is_admin() {
            return Err(CartsServiceError::AccessDenied);
        }

        Ok(self.entries.list_all().await?)
    }

    async fn get_entry(
        &self,
        principal: &Principal,
        entry: CartEntryUuid,
    ) -> Result<CartEntry, CartsServiceError> {
        if !principal.roles.is_admin() {
            return Err(CartsServiceError::AccessDenied);
        }

        self.entries
            .find_by_uuid(entry)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a new line for an item to the target user's cart, or the
    /// principal's own cart when no target is given.
    async fn add_item_for_user(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
        quantity: i64,
    ) -> Result<CartMutationResult, CartsServiceError>;

    /// Raise an existing line's quantity by one.
    async fn increment_item_count(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
    ) -> Result<CartMutationResult, CartsServiceError>;

    /// Lower an existing line's quantity by one, never below one.
    async fn decrement_item_count(
        &self,
        principal: &Principal,
        target: Option<UserUuid>,
        item: ItemUuid,
    ) -> Result<CartMutationResult, CartsServiceError>;

    /// Delete a line regardless of its quantity.
    async fn remove_entry(
        &self,
        principal: &Principal,
        entry: CartEntryUuid,
    ) -> Result<(), CartsServiceError>;

    /// The principal's own cart lines.
    async fn shopping_details(
        &self,
        principal: &Principal,
    ) -> Result<Vec<CartEntry>, CartsServiceError>;

    /// Discounted total of the principal's own cart.
    async fn total(&self, principal: &Principal) -> Result<Decimal, CartsServiceError>;

    /// Every line of every cart. Admin only.
    async fn list_entries(
        &self,
        principal: &Principal,
    ) -> Result<Vec<CartEntry>, CartsServiceError>;

    /// A single line by identifier. Admin only.
    async fn get_entry(
        &self,
        principal: &Principal,
        entry: CartEntryUuid,
    ) -> Result<CartEntry, CartsServiceError>;
}
