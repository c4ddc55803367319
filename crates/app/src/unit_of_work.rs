//! Unit of work shared by the catalog repositories.

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction, query};

/// Entity tables tracked by the change ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrackedEntity {
    Category,
    Product,
}

impl TrackedEntity {
    fn stamp_sql(self) -> &'static str {
        match self {
            Self::Category => "UPDATE categories SET updated_at = ?1 WHERE id = ?2",
            Self::Product => "UPDATE products SET updated_at = ?1 WHERE id = ?2",
        }
    }
}

/// How a staged row was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeState {
    Added,
    Modified,
}

#[derive(Debug, Clone, Copy)]
struct StagedChange {
    entity: TrackedEntity,
    id: i64,
    state: ChangeState,
}

/// Coordination point for one logical operation.
///
/// A unit of work owns a single open transaction, so the category and
/// product repositories working through it observe each other's staged
/// writes before anything is committed. [`UnitOfWork::save_changes`] is the
/// only point where staged writes become durable; it is also the only
/// writer of the `updated_at` column.
///
/// Dropping a unit of work rolls back whatever was not committed; an
/// abandoned operation never leaves a dangling transaction or a partial
/// save behind.
#[derive(Debug)]
pub struct UnitOfWork {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
    explicit: bool,
    staged: Vec<StagedChange>,
}

impl UnitOfWork {
    pub(crate) async fn begin(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;

        Ok(Self {
            pool,
            tx: Some(tx),
            explicit: false,
            staged: Vec::new(),
        })
    }

    /// The connection shared by every repository of this unit of work.
    pub(crate) fn conn(&mut self) -> Result<&mut SqliteConnection, sqlx::Error> {
        self.tx.as_deref_mut().ok_or_else(released)
    }

    /// Record a staged insert or update for the next save.
    pub(crate) fn stage(&mut self, entity: TrackedEntity, id: i64, state: ChangeState) {
        self.staged.push(StagedChange { entity, id, state });
    }

    /// Flush all staged changes and return how many were written.
    ///
    /// Every row staged as modified receives an `updated_at` stamp, at most
    /// once per row per save. Unless an explicit transaction is open, the
    /// flushed changes are committed atomically and a fresh transaction is
    /// opened for any follow-up reads.
    ///
    /// # Errors
    ///
    /// Returns an error when stamping or committing fails; nothing staged
    /// is durable in that case.
    pub async fn save_changes(&mut self) -> Result<u64, sqlx::Error> {
        let staged = std::mem::take(&mut self.staged);
        let stamp = Utc::now();
        let mut stamped: Vec<(TrackedEntity, i64)> = Vec::new();

        for change in staged.iter().filter(|c| c.state == ChangeState::Modified) {
            if stamped.contains(&(change.entity, change.id)) {
                continue;
            }

            query(change.entity.stamp_sql())
                .bind(stamp)
                .bind(change.id)
                .execute(self.conn()?)
                .await?;

            stamped.push((change.entity, change.id));
        }

        if !self.explicit {
            self.commit_current().await?;
        }

        Ok(staged.len() as u64)
    }

    /// Open an explicit transaction boundary.
    ///
    /// While the boundary is open, [`UnitOfWork::save_changes`] flushes
    /// staged writes without committing them; they become durable at
    /// [`UnitOfWork::commit_transaction`] or are discarded at
    /// [`UnitOfWork::rollback_transaction`].
    pub fn begin_transaction(&mut self) {
        self.explicit = true;
    }

    /// Commit everything written since the explicit boundary was opened.
    ///
    /// # Errors
    ///
    /// Returns an error when the commit fails; the writes are not durable
    /// in that case.
    pub async fn commit_transaction(&mut self) -> Result<(), sqlx::Error> {
        self.explicit = false;
        self.commit_current().await
    }

    /// Discard everything written since the explicit boundary was opened.
    ///
    /// # Errors
    ///
    /// Returns an error when the rollback cannot be issued.
    pub async fn rollback_transaction(&mut self) -> Result<(), sqlx::Error> {
        self.explicit = false;
        self.staged.clear();

        match self.tx.take() {
            Some(tx) => tx.rollback().await?,
            None => return Err(released()),
        }

        self.tx = Some(self.pool.begin().await?);

        Ok(())
    }

    async fn commit_current(&mut self) -> Result<(), sqlx::Error> {
        match self.tx.take() {
            Some(tx) => tx.commit().await?,
            None => return Err(released()),
        }

        self.tx = Some(self.pool.begin().await?);

        Ok(())
    }
}

fn released() -> sqlx::Error {
    sqlx::Error::Protocol("unit of work has been released".to_string())
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::{data::NewCategory, repository::SqliteCategoryRepository},
            repository::Repository,
        },
        test::TestDb,
    };

    use super::*;

    fn draft(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
        }
    }

    async fn count_categories(db: &TestDb) -> i64 {
        query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(db.pool())
            .await
            .expect("count query should succeed")
    }

    #[tokio::test]
    async fn save_changes_commits_staged_insert() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        repo.add(&mut uow, &draft("Electronics")).await?;
        let written = uow.save_changes().await?;
        drop(uow);

        assert_eq!(written, 1);
        assert_eq!(count_categories(&db).await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn dropping_without_save_discards_staged_insert() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        repo.add(&mut uow, &draft("Electronics")).await?;
        drop(uow);

        assert_eq!(count_categories(&db).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn staged_insert_is_visible_before_commit() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        let id = repo.add(&mut uow, &draft("Electronics")).await?;

        assert!(repo.exists(&mut uow, id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn explicit_rollback_discards_saved_changes() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        uow.begin_transaction();
        repo.add(&mut uow, &draft("Electronics")).await?;
        uow.save_changes().await?;
        uow.rollback_transaction().await?;
        drop(uow);

        assert_eq!(count_categories(&db).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn explicit_commit_persists_saved_changes() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        uow.begin_transaction();
        repo.add(&mut uow, &draft("Electronics")).await?;
        repo.add(&mut uow, &draft("Books")).await?;
        let written = uow.save_changes().await?;
        uow.commit_transaction().await?;
        drop(uow);

        assert_eq!(written, 2);
        assert_eq!(count_categories(&db).await, 2);

        Ok(())
    }

    #[tokio::test]
    async fn save_stamps_updated_at_only_for_modified_rows() -> TestResult {
        let db = TestDb::new().await;
        let repo = SqliteCategoryRepository::new();

        let mut uow = UnitOfWork::begin(db.pool().clone()).await?;
        let id = repo.add(&mut uow, &draft("Electronics")).await?;
        uow.save_changes().await?;

        let created = repo
            .get_by_id(&mut uow, id)
            .await?
            .expect("category should exist after save");
        assert!(created.updated_at.is_none(), "insert must not stamp updated_at");

        let mut changed = created;
        changed.description = Some("Electronic devices".to_string());
        repo.update(&mut uow, &changed).await?;
        uow.save_changes().await?;

        let reloaded = repo
            .get_by_id(&mut uow, id)
            .await?
            .expect("category should exist after update");
        assert!(reloaded.updated_at.is_some(), "update must stamp updated_at");

        Ok(())
    }
}
