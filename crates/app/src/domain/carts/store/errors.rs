//! Cart entry store errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartEntryStoreError {
    #[error("cart entry already exists")]
    DuplicateEntry,

    #[error("cart entry not found")]
    NotFound,

    #[error("quantity would fall below one")]
    QuantityBelowMinimum,

    #[error("quantity would exceed the maximum")]
    QuantityAboveMaximum,

    #[error("related user or item not found")]
    UnknownReference,

    #[error("concurrent update conflict")]
    Conflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartEntryStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let code = error
            .as_database_error()
            .and_then(DatabaseError::code)
            .map(|code| code.into_owned());

        match code.as_deref() {
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => return Self::Conflict,
            Some(NUMERIC_VALUE_OUT_OF_RANGE) => return Self::QuantityAboveMaximum,
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateEntry,
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownReference,
            Some(ErrorKind::CheckViolation) => Self::QuantityBelowMinimum,
            Some(ErrorKind::NotNullViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
