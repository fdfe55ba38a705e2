//! Database test utilities backed by a shared PostgreSQL container.

use std::error::Error;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    database::{self, Db},
    domain::{
        catalog::ItemUuid,
        users::{Role, UserUuid},
    },
};

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";
const POOL_SIZE: u32 = 5;

pub(crate) type SetupResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Container started once per test binary. Later tests only reuse its
/// resolved address.
struct SharedPostgres {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl SharedPostgres {
    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{DB_USER}:{DB_PASSWORD}@{}:{}/{database}",
            self.host, self.port
        )
    }
}

static POSTGRES: Lazy<OnceCell<SharedPostgres>> = Lazy::new(OnceCell::new);

async fn start_postgres() -> SetupResult<SharedPostgres> {
    let container = PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name("postgres")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await?;

    let port = container.get_host_port_ipv4(5432).await?;

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Ok(SharedPostgres {
        _container: container,
        host,
        port,
    })
}

/// A freshly migrated database of its own for one test.
///
/// Databases are not dropped individually; they go away with the container.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pub pool: PgPool,
}

impl TestDb {
    pub async fn new() -> SetupResult<Self> {
        let postgres = POSTGRES.get_or_try_init(start_postgres).await?;

        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        let mut admin = PgConnection::connect(&postgres.url("postgres")).await?;

        let create = format!("CREATE DATABASE \"{name}\"");

        query(&create).execute(&mut admin).await?;

        admin.close().await?;

        let pool = database::connect(&postgres.url(&name), POOL_SIZE).await?;

        database::migrate(&pool).await?;

        Ok(Self { pool })
    }

    pub fn db(&self) -> Db {
        Db::new(self.pool.clone())
    }

    /// Insert a user holding `roles`.
    pub async fn insert_user(
        &self,
        roles: &[Role],
        discount_rate: Decimal,
    ) -> SetupResult<UserUuid> {
        let user = UserUuid::new();

        query("INSERT INTO users (uuid, discount_rate) VALUES ($1, $2)")
            .bind(user.into_uuid())
            .bind(discount_rate)
            .execute(&self.pool)
            .await?;

        for role in roles {
            query("INSERT INTO user_roles (user_uuid, role) VALUES ($1, $2)")
                .bind(user.into_uuid())
                .bind(role.as_str())
                .execute(&self.pool)
                .await?;
        }

        Ok(user)
    }

    pub async fn insert_item(&self, price: Decimal, discountable: bool) -> SetupResult<ItemUuid> {
        let item = ItemUuid::new();

        query("INSERT INTO items (uuid, price, discountable) VALUES ($1, $2, $3)")
            .bind(item.into_uuid())
            .bind(price)
            .bind(discountable)
            .execute(&self.pool)
            .await?;

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn databases_are_migrated_and_isolated() -> TestResult {
        let first = TestDb::new().await?;
        let second = TestDb::new().await?;

        first.insert_user(&[Role::User], Decimal::ZERO).await?;

        let count = |db: TestDb| async move {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                .fetch_one(&db.pool)
                .await
        };

        assert_eq!(count(first).await?, 1);
        assert_eq!(count(second).await?, 0);

        Ok(())
    }
}
