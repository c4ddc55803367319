//! Categories Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    domain::{
        categories::{
            data::NewCategory,
            models::{Category, CategoryWithProducts},
        },
        products::models::Product,
        repository::Repository,
    },
    unit_of_work::{ChangeState, TrackedEntity, UnitOfWork},
};

const GET_CATEGORY_SQL: &str =
    "SELECT id, name, description, created_at, updated_at, is_deleted \
     FROM categories WHERE id = ?1 AND is_deleted = 0";

const LIST_CATEGORIES_SQL: &str =
    "SELECT id, name, description, created_at, updated_at, is_deleted \
     FROM categories WHERE is_deleted = 0 ORDER BY id";

const INSERT_CATEGORY_SQL: &str =
    "INSERT INTO categories (name, description, created_at, updated_at, is_deleted) \
     VALUES (?1, ?2, ?3, NULL, 0)";

const UPDATE_CATEGORY_SQL: &str =
    "UPDATE categories SET name = ?2, description = ?3, is_deleted = ?4 WHERE id = ?1";

const CATEGORY_EXISTS_SQL: &str =
    "SELECT EXISTS (SELECT 1 FROM categories WHERE id = ?1 AND is_deleted = 0)";

const NAME_TAKEN_SQL: &str = "SELECT EXISTS (\
     SELECT 1 FROM categories \
     WHERE lower(name) = lower(?1) AND is_deleted = 0 AND (?2 IS NULL OR id <> ?2))";

const PRODUCTS_OF_CATEGORY_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products WHERE category_id = ?1 AND is_deleted = 0 ORDER BY id";

const LIVE_PRODUCTS_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products WHERE is_deleted = 0 ORDER BY id";

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCategoryRepository;

impl SqliteCategoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch one category together with its non-deleted products.
    pub(crate) async fn get_with_products(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<Option<CategoryWithProducts>, sqlx::Error> {
        let Some(category) = query_as::<_, Category>(GET_CATEGORY_SQL)
            .bind(id)
            .fetch_optional(uow.conn()?)
            .await?
        else {
            return Ok(None);
        };

        let products = query_as::<_, Product>(PRODUCTS_OF_CATEGORY_SQL)
            .bind(id)
            .fetch_all(uow.conn()?)
            .await?;

        Ok(Some(CategoryWithProducts { category, products }))
    }

    /// Fetch every non-deleted category with its non-deleted products.
    pub(crate) async fn get_all_with_products(
        &self,
        uow: &mut UnitOfWork,
    ) -> Result<Vec<CategoryWithProducts>, sqlx::Error> {
        let categories = query_as::<_, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(uow.conn()?)
            .await?;

        let products = query_as::<_, Product>(LIVE_PRODUCTS_SQL)
            .fetch_all(uow.conn()?)
            .await?;

        let mut entries: Vec<CategoryWithProducts> = categories
            .into_iter()
            .map(|category| CategoryWithProducts {
                category,
                products: Vec::new(),
            })
            .collect();

        for product in products {
            if let Some(entry) = entries
                .iter_mut()
                .find(|entry| entry.category.id == product.category_id)
            {
                entry.products.push(product);
            }
        }

        Ok(entries)
    }

    /// Whether `name` is free among non-deleted categories, compared
    /// case-insensitively. `exclude_id` skips one row so an update can keep
    /// its own name.
    pub(crate) async fn is_name_unique(
        &self,
        uow: &mut UnitOfWork,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, sqlx::Error> {
        let taken: bool = query_scalar(NAME_TAKEN_SQL)
            .bind(name)
            .bind(exclude_id)
            .fetch_one(uow.conn()?)
            .await?;

        Ok(!taken)
    }
}

#[async_trait]
impl Repository for SqliteCategoryRepository {
    type Row = Category;
    type Draft = NewCategory;

    async fn get_by_id(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<Option<Category>, sqlx::Error> {
        query_as::<_, Category>(GET_CATEGORY_SQL)
            .bind(id)
            .fetch_optional(uow.conn()?)
            .await
    }

    async fn get_all(&self, uow: &mut UnitOfWork) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<_, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(uow.conn()?)
            .await
    }

    async fn add(&self, uow: &mut UnitOfWork, draft: &NewCategory) -> Result<i64, sqlx::Error> {
        let created_at = Utc::now();

        let result = query(INSERT_CATEGORY_SQL)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(created_at)
            .execute(uow.conn()?)
            .await?;

        let id = result.last_insert_rowid();
        uow.stage(TrackedEntity::Category, id, ChangeState::Added);

        Ok(id)
    }

    async fn update(&self, uow: &mut UnitOfWork, row: &Category) -> Result<(), sqlx::Error> {
        query(UPDATE_CATEGORY_SQL)
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.description)
            .bind(row.is_deleted)
            .execute(uow.conn()?)
            .await?;

        uow.stage(TrackedEntity::Category, row.id, ChangeState::Modified);

        Ok(())
    }

    async fn exists(&self, uow: &mut UnitOfWork, id: i64) -> Result<bool, sqlx::Error> {
        query_scalar(CATEGORY_EXISTS_SQL)
            .bind(id)
            .fetch_one(uow.conn()?)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Category {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}
