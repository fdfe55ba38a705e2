//! Users Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::users::{
    errors::UsersError,
    models::{User, UserUuid},
    roles::{Role, Roles},
};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user(&self, user: UserUuid) -> Result<Option<User>, UsersError> {
        let found = query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(found)
    }
}

/// Decode a `TEXT[]` column of role names.
pub(crate) fn roles_from_row(row: &PgRow, column: &str) -> sqlx::Result<Roles> {
    let names: Vec<String> = row.try_get(column)?;

    names
        .iter()
        .map(|name| name.parse::<Role>())
        .collect::<Result<Roles, _>>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            roles: roles_from_row(row, "roles")?,
        })
    }
}

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look up a user, returning `None` when no such user exists.
    async fn find_user(&self, user: UserUuid) -> Result<Option<User>, UsersError>;
}
