//! Products Repository

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    domain::{
        categories::models::Category,
        products::{
            data::NewProduct,
            models::{Product, ProductWithCategory},
        },
        repository::Repository,
    },
    unit_of_work::{ChangeState, TrackedEntity, UnitOfWork},
};

const GET_PRODUCT_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products WHERE id = ?1 AND is_deleted = 0";

const LIST_PRODUCTS_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products WHERE is_deleted = 0 ORDER BY id";

const INSERT_PRODUCT_SQL: &str =
    "INSERT INTO products (name, description, price, stock, category_id, created_at, updated_at, is_deleted) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, 0)";

const UPDATE_PRODUCT_SQL: &str = "UPDATE products \
     SET name = ?2, description = ?3, price = ?4, stock = ?5, category_id = ?6, is_deleted = ?7 \
     WHERE id = ?1";

const PRODUCT_EXISTS_SQL: &str =
    "SELECT EXISTS (SELECT 1 FROM products WHERE id = ?1 AND is_deleted = 0)";

const NAME_TAKEN_SQL: &str = "SELECT EXISTS (\
     SELECT 1 FROM products \
     WHERE lower(name) = lower(?1) AND is_deleted = 0 AND (?2 IS NULL OR id <> ?2))";

const BY_CATEGORY_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products WHERE category_id = ?1 AND is_deleted = 0 ORDER BY id";

const SEARCH_SQL: &str =
    "SELECT id, name, description, price, stock, category_id, created_at, updated_at, is_deleted \
     FROM products \
     WHERE is_deleted = 0 \
       AND (name LIKE '%' || ?1 || '%' \
            OR (description IS NOT NULL AND description LIKE '%' || ?1 || '%')) \
     ORDER BY id";

const GET_WITH_CATEGORY_SQL: &str = "SELECT \
       p.id, p.name, p.description, p.price, p.stock, p.category_id, \
       p.created_at, p.updated_at, p.is_deleted, \
       c.id AS c_id, c.name AS c_name, c.description AS c_description, \
       c.created_at AS c_created_at, c.updated_at AS c_updated_at, c.is_deleted AS c_is_deleted \
     FROM products p \
     INNER JOIN categories c ON c.id = p.category_id \
     WHERE p.id = ?1 AND p.is_deleted = 0";

const LIST_WITH_CATEGORY_SQL: &str = "SELECT \
       p.id, p.name, p.description, p.price, p.stock, p.category_id, \
       p.created_at, p.updated_at, p.is_deleted, \
       c.id AS c_id, c.name AS c_name, c.description AS c_description, \
       c.created_at AS c_created_at, c.updated_at AS c_updated_at, c.is_deleted AS c_is_deleted \
     FROM products p \
     INNER JOIN categories c ON c.id = p.category_id \
     WHERE p.is_deleted = 0 \
     ORDER BY p.id";

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductRepository;

impl SqliteProductRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch one product with its category attached.
    pub(crate) async fn get_with_category(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<Option<ProductWithCategory>, sqlx::Error> {
        query_as::<_, ProductWithCategory>(GET_WITH_CATEGORY_SQL)
            .bind(id)
            .fetch_optional(uow.conn()?)
            .await
    }

    /// Fetch every non-deleted product with its category attached.
    pub(crate) async fn get_all_with_category(
        &self,
        uow: &mut UnitOfWork,
    ) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
        query_as::<_, ProductWithCategory>(LIST_WITH_CATEGORY_SQL)
            .fetch_all(uow.conn()?)
            .await
    }

    /// Fetch the non-deleted products of one category. An absent or empty
    /// category yields an empty list; the category itself is not checked.
    pub(crate) async fn get_by_category(
        &self,
        uow: &mut UnitOfWork,
        category_id: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>(BY_CATEGORY_SQL)
            .bind(category_id)
            .fetch_all(uow.conn()?)
            .await
    }

    /// Substring search against name or description. A NULL description
    /// never matches. Rejecting empty terms is the caller's concern.
    pub(crate) async fn search(
        &self,
        uow: &mut UnitOfWork,
        term: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>(SEARCH_SQL)
            .bind(term)
            .fetch_all(uow.conn()?)
            .await
    }

    /// Whether `name` is free among non-deleted products, compared
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
impl Repository for SqliteProductRepository {
    type Row = Product;
    type Draft = NewProduct;

    async fn get_by_id(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<_, Product>(GET_PRODUCT_SQL)
            .bind(id)
            .fetch_optional(uow.conn()?)
            .await
    }

    async fn get_all(&self, uow: &mut UnitOfWork) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(uow.conn()?)
            .await
    }

    async fn add(&self, uow: &mut UnitOfWork, draft: &NewProduct) -> Result<i64, sqlx::Error> {
        let created_at = Utc::now();

        let result = query(INSERT_PRODUCT_SQL)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price.to_string())
            .bind(draft.stock)
            .bind(draft.category_id)
            .bind(created_at)
            .execute(uow.conn()?)
            .await?;

        let id = result.last_insert_rowid();
        uow.stage(TrackedEntity::Product, id, ChangeState::Added);

        Ok(id)
    }

    async fn update(&self, uow: &mut UnitOfWork, row: &Product) -> Result<(), sqlx::Error> {
        query(UPDATE_PRODUCT_SQL)
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.description)
            .bind(row.price.to_string())
            .bind(row.stock)
            .bind(row.category_id)
            .bind(row.is_deleted)
            .execute(uow.conn()?)
            .await?;

        uow.stage(TrackedEntity::Product, row.id, ChangeState::Modified);

        Ok(())
    }

    async fn exists(&self, uow: &mut UnitOfWork, id: i64) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_EXISTS_SQL)
            .bind(id)
            .fetch_one(uow.conn()?)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let price_text: String = row.try_get("price")?;

        let price = Decimal::from_str(&price_text).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price,
            stock: row.try_get("stock")?,
            category_id: row.try_get("category_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductWithCategory {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: Product::from_row(row)?,
            category: Category {
                id: row.try_get("c_id")?,
                name: row.try_get("c_name")?,
                description: row.try_get("c_description")?,
                created_at: row.try_get("c_created_at")?,
                updated_at: row.try_get("c_updated_at")?,
                is_deleted: row.try_get("c_is_deleted")?,
            },
        })
    }
}
