//! Product transfer models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::models::{Product, ProductWithCategory};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    /// The product name
    pub name: String,

    /// The optional product description
    pub description: Option<String>,

    /// The product price as a decimal string
    pub price: String,

    /// Units in stock
    pub stock: i64,

    /// The id of the owning category
    pub category_id: i64,

    /// The owning category's name, when it was loaded with the product
    pub category_name: Option<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            stock: product.stock,
            category_id: product.category_id,
            category_name: None,
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.map(|at| at.to_rfc3339()),
        }
    }
}

impl From<ProductWithCategory> for ProductResponse {
    fn from(entry: ProductWithCategory) -> Self {
        ProductResponse {
            category_name: Some(entry.category.name),
            ..entry.product.into()
        }
    }
}
