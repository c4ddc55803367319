//! Category transfer models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use catalog_app::domain::categories::models::{Category, CategoryWithProducts};

use crate::products::models::ProductResponse;

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub id: i64,

    /// The category name
    pub name: String,

    /// The optional category description
    pub description: Option<String>,

    /// The date and time the category was created
    pub created_at: String,

    /// The date and time the category was last updated
    pub updated_at: Option<String>,

    /// How many non-deleted products the category contains
    pub product_count: usize,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at.to_rfc3339(),
            updated_at: category.updated_at.map(|at| at.to_rfc3339()),
            product_count: 0,
        }
    }
}

impl From<CategoryWithProducts> for CategoryResponse {
    fn from(entry: CategoryWithProducts) -> Self {
        let product_count = entry.products.len();

        CategoryResponse {
            product_count,
            ..entry.category.into()
        }
    }
}

/// Category with its products embedded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryProductsResponse {
    /// The category itself
    pub category: CategoryResponse,

    /// The category's non-deleted products
    pub products: Vec<ProductResponse>,
}

impl From<CategoryWithProducts> for CategoryProductsResponse {
    fn from(entry: CategoryWithProducts) -> Self {
        let product_count = entry.products.len();

        CategoryProductsResponse {
            category: CategoryResponse {
                product_count,
                ..entry.category.into()
            },
            products: entry.products.into_iter().map(Into::into).collect(),
        }
    }
}
