//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{CategoryUpdate, NewCategory},
            errors::CategoriesServiceError,
            models::{Category, CategoryWithProducts},
            repository::SqliteCategoryRepository,
        },
        repository::Repository,
    },
    unit_of_work::UnitOfWork,
};

#[derive(Debug, Clone)]
pub struct SqliteCategoriesService {
    db: Db,
    categories: SqliteCategoryRepository,
}

impl SqliteCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
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
    ) -> Result<Category, CategoriesServiceError> {
        self.categories
            .get_by_id(uow, id)
            .await?
            .ok_or(CategoriesServiceError::MissingAfterSave)
    }
}

#[async_trait]
impl CategoriesService for SqliteCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let categories = self.categories.get_all_with_products(&mut uow).await?;

        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Category, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        self.categories
            .get_by_id(&mut uow, id)
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn get_category_with_products(
        &self,
        id: i64,
    ) -> Result<CategoryWithProducts, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        self.categories
            .get_with_products(&mut uow, id)
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        if !self
            .categories
            .is_name_unique(&mut uow, &category.name, None)
            .await?
        {
            return Err(CategoriesServiceError::DuplicateName);
        }

        let id = self.categories.add(&mut uow, &category).await?;
        uow.save_changes().await?;

        debug!(id, name = %category.name, "category created");

        self.reload(&mut uow, id).await
    }

    async fn update_category(
        &self,
        id: i64,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let Some(mut existing) = self.categories.get_by_id(&mut uow, id).await? else {
            return Err(CategoriesServiceError::NotFound);
        };

        if !self
            .categories
            .is_name_unique(&mut uow, &update.name, Some(id))
            .await?
        {
            return Err(CategoriesServiceError::DuplicateName);
        }

        existing.name = update.name;
        existing.description = update.description;

        self.categories.update(&mut uow, &existing).await?;
        uow.save_changes().await?;

        self.reload(&mut uow, id).await
    }

    async fn delete_category(&self, id: i64) -> Result<(), CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        let Some(entry) = self.categories.get_with_products(&mut uow, id).await? else {
            return Err(CategoriesServiceError::NotFound);
        };

        // Deletion is blocked, never cascaded, while live products remain.
        if !entry.products.is_empty() {
            return Err(CategoriesServiceError::HasProducts);
        }

        let mut existing = entry.category;
        existing.is_deleted = true;

        self.categories.update(&mut uow, &existing).await?;
        uow.save_changes().await?;

        debug!(id, "category soft-deleted");

        Ok(())
    }

    async fn category_exists(&self, id: i64) -> Result<bool, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        Ok(self.categories.exists(&mut uow, id).await?)
    }

    async fn is_name_unique(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, CategoriesServiceError> {
        let mut uow = self.db.begin_unit_of_work().await?;

        Ok(self
            .categories
            .is_name_unique(&mut uow, name, exclude_id)
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve every non-deleted category with its products.
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(&self, id: i64) -> Result<Category, CategoriesServiceError>;

    /// Retrieve a single category with its non-deleted products.
    async fn get_category_with_products(
        &self,
        id: i64,
    ) -> Result<CategoryWithProducts, CategoriesServiceError>;

    /// Create a new category with a unique name.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;

    /// Update an existing category's fields.
    async fn update_category(
        &self,
        id: i64,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError>;

    /// Soft-delete a category that no longer contains products.
    async fn delete_category(&self, id: i64) -> Result<(), CategoriesServiceError>;

    /// Whether a non-deleted category with this id exists.
    async fn category_exists(&self, id: i64) -> Result<bool, CategoriesServiceError>;

    /// Whether a category name is free, optionally ignoring one id.
    async fn is_name_unique(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::NewProduct},
        test::TestContext,
    };

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
        }
    }

    fn new_product(name: &str, category_id: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::new(99999, 2),
            stock: 10,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_category_returns_populated_row() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(NewCategory {
                name: "Electronics".to_string(),
                description: Some("Electronic devices and gadgets".to_string()),
            })
            .await?;

        assert!(category.id > 0);
        assert_eq!(category.name, "Electronics");
        assert_eq!(
            category.description.as_deref(),
            Some("Electronic devices and gadgets")
        );
        assert!(category.updated_at.is_none());
        assert!(!category.is_deleted);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_name_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Books"))
            .await?;

        let result = ctx.categories.create_category(new_category("books")).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::DuplicateName)),
            "expected DuplicateName, got {result:?}"
        );

        let listed = ctx.categories.list_categories().await?;
        assert_eq!(listed.len(), 1, "first Books row must remain the only one");
        assert_eq!(listed[0].category.name, "Books");

        Ok(())
    }

    #[tokio::test]
    async fn category_name_is_free_again_after_soft_delete() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .categories
            .create_category(new_category("Books"))
            .await?;

        ctx.categories.delete_category(first.id).await?;

        let second = ctx
            .categories
            .create_category(new_category("Books"))
            .await?;

        assert_ne!(first.id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_changes_fields_and_stamps_updated_at() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;
        assert!(created.updated_at.is_none());

        let updated = ctx
            .categories
            .update_category(
                created.id,
                CategoryUpdate {
                    name: "Gadgets".to_string(),
                    description: Some("Gadgets of all kinds".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "Gadgets");
        assert_eq!(updated.description.as_deref(), Some("Gadgets of all kinds"));
        assert!(
            updated.updated_at.is_some(),
            "updated_at must be stamped by the first update"
        );
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_may_keep_its_own_name() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;

        let updated = ctx
            .categories
            .update_category(
                created.id,
                CategoryUpdate {
                    name: "Electronics".to_string(),
                    description: Some("same name, new description".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "Electronics");

        Ok(())
    }

    #[tokio::test]
    async fn update_category_rejects_name_of_another_category() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Electronics"))
            .await?;
        let books = ctx
            .categories
            .create_category(new_category("Books"))
            .await?;

        let result = ctx
            .categories
            .update_category(
                books.id,
                CategoryUpdate {
                    name: "ELECTRONICS".to_string(),
                    description: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::DuplicateName)),
            "expected DuplicateName, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_category_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .update_category(
                42,
                CategoryUpdate {
                    name: "Anything".to_string(),
                    description: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_category_with_live_product_is_blocked() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;
        let product = ctx
            .products
            .create_product(new_product("Laptop", category.id))
            .await?;

        let blocked = ctx.categories.delete_category(category.id).await;
        assert!(
            matches!(blocked, Err(CategoriesServiceError::HasProducts)),
            "expected HasProducts, got {blocked:?}"
        );

        // Once its products are soft-deleted, the category can go too.
        ctx.products.delete_product(product.product.id).await?;
        ctx.categories.delete_category(category.id).await?;

        let result = ctx.categories.get_category(category.id).await;
        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound after delete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.delete_category(7).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_category_is_hidden_from_every_read() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Clothing"))
            .await?;

        ctx.categories.delete_category(category.id).await?;

        let by_id = ctx.categories.get_category(category.id).await;
        assert!(matches!(by_id, Err(CategoriesServiceError::NotFound)));

        let with_products = ctx.categories.get_category_with_products(category.id).await;
        assert!(matches!(
            with_products,
            Err(CategoriesServiceError::NotFound)
        ));

        assert!(ctx.categories.list_categories().await?.is_empty());
        assert!(!ctx.categories.category_exists(category.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn get_category_with_products_excludes_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;
        let laptop = ctx
            .products
            .create_product(new_product("Laptop", category.id))
            .await?;
        let phone = ctx
            .products
            .create_product(new_product("Smartphone", category.id))
            .await?;

        ctx.products.delete_product(laptop.product.id).await?;

        let entry = ctx
            .categories
            .get_category_with_products(category.id)
            .await?;

        assert_eq!(entry.products.len(), 1);
        assert_eq!(entry.products[0].id, phone.product.id);

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_attaches_products_to_their_category() -> TestResult {
        let ctx = TestContext::new().await;

        let electronics = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;
        let books = ctx
            .categories
            .create_category(new_category("Books"))
            .await?;

        ctx.products
            .create_product(new_product("Laptop", electronics.id))
            .await?;
        ctx.products
            .create_product(new_product("Smartphone", electronics.id))
            .await?;

        let listed = ctx.categories.list_categories().await?;

        let electronics_entry = listed
            .iter()
            .find(|entry| entry.category.id == electronics.id)
            .expect("electronics should be listed");
        let books_entry = listed
            .iter()
            .find(|entry| entry.category.id == books.id)
            .expect("books should be listed");

        assert_eq!(electronics_entry.products.len(), 2);
        assert!(books_entry.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn is_name_unique_honours_exclusion() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Electronics"))
            .await?;

        assert!(!ctx.categories.is_name_unique("electronics", None).await?);
        assert!(
            ctx.categories
                .is_name_unique("electronics", Some(category.id))
                .await?
        );
        assert!(ctx.categories.is_name_unique("Books", None).await?);

        Ok(())
    }
}
