//! Shared repository contract over one entity table.

use async_trait::async_trait;

use crate::unit_of_work::UnitOfWork;

/// Typed CRUD operations over a single entity table.
///
/// Every read composes the mandatory soft-delete predicate: rows flagged as
/// deleted are invisible to all five operations, and no bypass exists.
/// Writes are staged on the unit of work and become durable only at its
/// save point.
#[async_trait]
pub trait Repository {
    /// Fully populated row type.
    type Row: Send;

    /// Insert payload; the store assigns the id.
    type Draft: Send + Sync;

    /// Fetch one non-deleted row by id.
    async fn get_by_id(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<Option<Self::Row>, sqlx::Error>;

    /// Fetch every non-deleted row, ordered by id.
    async fn get_all(&self, uow: &mut UnitOfWork) -> Result<Vec<Self::Row>, sqlx::Error>;

    /// Stage an insert and return the store-assigned id.
    async fn add(&self, uow: &mut UnitOfWork, draft: &Self::Draft) -> Result<i64, sqlx::Error>;

    /// Stage a full-row update of a previously fetched row.
    async fn update(&self, uow: &mut UnitOfWork, row: &Self::Row) -> Result<(), sqlx::Error>;

    /// Whether a non-deleted row with this id exists.
    async fn exists(&self, uow: &mut UnitOfWork, id: i64) -> Result<bool, sqlx::Error>;
}
