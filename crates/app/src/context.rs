//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    database,
    domain::products::{PgProductsRepository, ProductsRepository},
};

/// Failure while assembling the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    /// Product persistence.
    pub products: Arc<dyn ProductsRepository>,
}

impl AppContext {
    /// Build application context around an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            products: Arc::new(PgProductsRepository::new(pool)),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max_connections(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool))
    }
}
