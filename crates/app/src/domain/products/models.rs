//! Product Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::categories::models::Category;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Product with its category eagerly attached.
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Category,
}
