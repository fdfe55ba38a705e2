//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    auth::models::Principal,
    domain::users::{UserUuid, roles_from_row},
};

const FIND_PRINCIPAL_BY_TOKEN_HASH_SQL: &str =
    include_str!("sql/find_principal_by_token_hash.sql");
const TOUCH_API_TOKEN_LAST_USED_SQL: &str = include_str!("sql/touch_api_token_last_used.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_principal_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Principal>, sqlx::Error> {
        query_as::<Postgres, Principal>(FIND_PRINCIPAL_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token_last_used(&self, hash: &str) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_LAST_USED_SQL)
            .bind(hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Principal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            roles: roles_from_row(row, "roles")?,
        })
    }
}
