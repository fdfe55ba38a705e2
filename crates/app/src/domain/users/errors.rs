//! Users repository errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
