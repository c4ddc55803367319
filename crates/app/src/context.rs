//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        categories::{CategoriesService, SqliteCategoriesService},
        products::{ProductsService, SqliteProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    /// Assemble a context from already constructed services.
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoriesService>,
        products: Arc<dyn ProductsService>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Build application context from a database URL, applying pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or migrating it
    /// fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        database::run_migrations(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool);

        Ok(Self {
            categories: Arc::new(SqliteCategoriesService::new(db.clone())),
            products: Arc::new(SqliteProductsService::new(db)),
        })
    }
}
