//! Cart request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{CartErrorCode, CartMutationResult, models::CartEntry};

/// Add Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// User whose cart is changed; defaults to the caller
    #[serde(default)]
    pub user_uuid: Option<Uuid>,

    /// Catalog item to add
    pub item_uuid: Uuid,

    /// Initial quantity, at least one
    pub quantity: i64,
}

/// Quantity Step Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuantityStepRequest {
    /// User whose cart is changed; defaults to the caller
    #[serde(default)]
    pub user_uuid: Option<Uuid>,

    /// Item whose line is changed
    pub item_uuid: Uuid,
}

/// Business-rule rejection code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ErrorCode {
    UserInvalid,
    AccessDenied,
    CountBelowMinimum,
    CartItemNotFound,
    DuplicateEntry,
}

impl From<CartErrorCode> for ErrorCode {
    fn from(code: CartErrorCode) -> Self {
        match code {
            CartErrorCode::UserInvalid => Self::UserInvalid,
            CartErrorCode::AccessDenied => Self::AccessDenied,
            CartErrorCode::CountBelowMinimum => Self::CountBelowMinimum,
            CartErrorCode::CartItemNotFound => Self::CartItemNotFound,
            CartErrorCode::DuplicateEntry => Self::DuplicateEntry,
        }
    }
}

/// Cart Mutation Response
///
/// `success` is true exactly when `error_codes` is empty.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub success: bool,
    pub error_codes: Vec<ErrorCode>,
}

impl From<CartMutationResult> for CartMutationResponse {
    fn from(result: CartMutationResult) -> Self {
        Self {
            success: result.success(),
            error_codes: result
                .error_codes()
                .iter()
                .copied()
                .map(ErrorCode::from)
                .collect(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Entry identifier, used to remove the line
    pub uuid: Uuid,

    pub item_uuid: Uuid,

    pub quantity: u32,
}

impl From<CartEntry> for CartLineResponse {
    fn from(entry: CartEntry) -> Self {
        Self {
            uuid: entry.uuid.into(),
            item_uuid: entry.item_uuid.into(),
            quantity: entry.quantity,
        }
    }
}

/// Cart Total Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartTotalResponse {
    /// Discounted total as a decimal string, e.g. `"40.50"`
    pub total: String,
}
