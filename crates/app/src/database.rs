//! Database connection management

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::info;

use crate::unit_of_work::UnitOfWork;

/// Shared handle to the catalog database.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a unit of work for one logical operation.
    ///
    /// The unit of work holds a single connection from the pool for its
    /// lifetime; every repository call made through it sees the same
    /// uncommitted writes until [`UnitOfWork::save_changes`] commits them.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the
    /// transaction cannot be started.
    pub async fn begin_unit_of_work(&self) -> Result<UnitOfWork, sqlx::Error> {
        UnitOfWork::begin(self.pool.clone()).await
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Connect to `SQLite`, creating the database file when missing.
///
/// WAL journaling keeps concurrent readers from blocking the writer, and
/// foreign key enforcement is switched on (`SQLite` leaves it off by
/// default).
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    info!(url = %database_url, "database pool created");

    Ok(pool)
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
