//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        categories::repository::SqliteCategoryRepository,
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            models::{Product, ProductWithCategory},
            repository::SqliteProductRepository,
        },
        repository::Repository,
    },
    unit_of_work::UnitOfWork,
};

#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    products: SqliteProductRepository,
    categories: SqliteCategoryRepository,
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: SqliteProductRepository::new(),
            categories: SqliteCategoryRepository::new(),
        }
    }

    /// Re-fetch a row that a successful save just wrote. A miss here means
    /// the store lost a committed row, which is fatal rather than a caller
    /// error.
    async fn reload(
        &self,
        uow: &mut UnitOfWork,
        id: i64,
    ) -> Result<ProductWithCategory, ProductsServiceError> {
        self.products
            .get_with_category(uow, id)
            .await?
            .ok_or(ProductsServiceError::MissingAfterSave)
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn list_products(&self) -> Result<Vec<ProductWithCategory>, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let products = self.products.get_all_with_category(&mut uow).await?;

        Ok(products)
    }

    async fn get_product(&self, id: i64) -> Result<ProductWithCategory, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        self.products
            .get_with_category(&mut uow, id)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn get_products_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let products = self.products.get_by_category(&mut uow, category_id).await?;

        Ok(products)
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let products = self.products.search(&mut uow, term).await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductWithCategory, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        if !self
            .categories
            .exists(&mut uow, product.category_id)
            .await?
        {
            return Err(ProductsServiceError::UnknownCategory);
        }

        if !self
            .products
            .is_name_unique(&mut uow, &product.name, None)
            .await?
        {
            return Err(ProductsServiceError::DuplicateName);
        }

        let id = self.products.add(&mut uow, &product).await?;
        uow.save_changes().await?;

        debug!(id, name = %product.name, "product created");

        self.reload(&mut uow, id).await
    }

    async fn update_product(
        &self,
        id: i64,
        update: ProductUpdate,
    ) -> Result<ProductWithCategory, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let Some(mut existing) = self.products.get_by_id(&mut uow, id).await? else {
            return Err(ProductsServiceError::NotFound);
        };

        if !self.categories.exists(&mut uow, update.category_id).await? {
            return Err(ProductsServiceError::UnknownCategory);
        }

        if !self
            .products
            .is_name_unique(&mut uow, &update.name, Some(id))
            .await?
        {
            return Err(ProductsServiceError::DuplicateName);
        }

        existing.name = update.name;
        existing.description = update.description;
        existing.price = update.price;
        existing.stock = update.stock;
        existing.category_id = update.category_id;

        self.products.update(&mut uow, &existing).await?;
        uow.save_changes().await?;

        self.reload(&mut uow, id).await
    }

    async fn delete_product(&self, id: i64) -> Result<(), ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let Some(mut existing) = self.products.get_by_id(&mut uow, id).await? else {
            return Err(ProductsServiceError::NotFound);
        };

        existing.is_deleted = true;

        self.products.update(&mut uow, &existing).await?;
        uow.save_changes().await?;

        debug!(id, "product soft-deleted");

        Ok(())
    }

    async fn product_exists(&self, id: i64) -> Result<bool, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        Ok(self.products.exists(&mut uow, id).await?)
    }

    async fn is_name_unique(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, ProductsServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        Ok(self
            .products
            .is_name_unique(&mut uow, name, exclude_id)
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve every non-deleted product with its category.
    async fn list_products(&self) -> Result<Vec<ProductWithCategory>, ProductsServiceError>;

    /// Retrieve a single product with its category.
    async fn get_product(&self, id: i64) -> Result<ProductWithCategory, ProductsServiceError>;

    /// Retrieve the non-deleted products of one category.
    async fn get_products_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Substring search against product names and descriptions.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Create a new product referencing an existing category.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductWithCategory, ProductsServiceError>;

    /// Update an existing product's fields.
    async fn update_product(
        &self,
        id: i64,
        update: ProductUpdate,
    ) -> Result<ProductWithCategory, ProductsServiceError>;

    /// Soft-delete a product.
    async fn delete_product(&self, id: i64) -> Result<(), ProductsServiceError>;

    /// Whether a non-deleted product with this id exists.
    async fn product_exists(&self, id: i64) -> Result<bool, ProductsServiceError>;

    /// Whether a product name is free, optionally ignoring one id.
    async fn is_name_unique(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, ProductsServiceError>;
}
