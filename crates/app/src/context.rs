//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsEngine, CartsService, store::PgCartEntryStore},
        catalog::PgCatalog,
        users::PgUsersRepository,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub auth: Arc<dyn AuthService>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let carts = CartsEngine::new(
            Arc::new(PgCartEntryStore::new(Db::new(pool.clone()))),
            Arc::new(PgUsersRepository::new(pool.clone())),
            Arc::new(PgCatalog::new(pool.clone())),
        );

        Ok(Self {
            carts: Arc::new(carts),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
