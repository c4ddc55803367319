//! Test helpers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use catalog_app::{
    context::AppContext,
    domain::{
        categories::{MockCategoriesService, models::Category},
        products::{
            MockProductsService,
            models::{Product, ProductWithCategory},
        },
    },
};

use crate::state::State;

pub(crate) fn make_product_model(id: i64, name: &str, category_id: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        price: Decimal::new(99999, 2),
        stock: 50,
        category_id,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: None,
        is_deleted: false,
    }
}

pub(crate) fn make_product_with_category(
    id: i64,
    name: &str,
    category: &str,
) -> ProductWithCategory {
    ProductWithCategory {
        product: make_product_model(id, name, 1),
        category: Category {
            id: 1,
            name: category.to_string(),
            description: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
            is_deleted: false,
        },
    }
}

fn state_with(categories: MockCategoriesService, products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(AppContext::new(
        Arc::new(categories),
        Arc::new(products),
    )))
}

/// Route backed by a categories mock; any product-service call panics.
pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(categories, MockProductsService::new())))
            .push(route),
    )
}

/// Route backed by a products mock; any category-service call panics.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(MockCategoriesService::new(), products)))
            .push(route),
    )
}
