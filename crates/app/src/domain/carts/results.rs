//! Cart mutation results.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;

/// Business-rule rejection reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartErrorCode {
    /// Target user does not exist.
    UserInvalid,

    /// Caller may not act on the target user's cart.
    AccessDenied,

    /// Quantity would fall below one.
    CountBelowMinimum,

    /// No entry exists for the user and item.
    CartItemNotFound,

    /// An entry already exists for the user and item.
    DuplicateEntry,
}

impl CartErrorCode {
    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::UserInvalid => 1,
            Self::AccessDenied => 2,
            Self::CountBelowMinimum => 3,
            Self::CartItemNotFound => 4,
            Self::DuplicateEntry => 5,
        }
    }

    /// Stable symbolic tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserInvalid => "USER_INVALID",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::CountBelowMinimum => "COUNT_BELOW_MINIMUM",
            Self::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
        }
    }
}

impl Display for CartErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Outcome of a cart mutation.
///
/// `success` is true exactly when `error_codes` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMutationResult {
    success: bool,
    error_codes: SmallVec<[CartErrorCode; 2]>,
}

impl CartMutationResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error_codes: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn rejected(code: CartErrorCode) -> Self {
        Self::from_errors([code])
    }

    #[must_use]
    pub fn from_errors<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = CartErrorCode>,
    {
        let error_codes: SmallVec<[CartErrorCode; 2]> = codes.into_iter().collect();

        Self {
            success: error_codes.is_empty(),
            error_codes,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn error_codes(&self) -> &[CartErrorCode] {
        &self.error_codes
    }
}
