//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
    validation,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Decimal string, e.g. `"999.99"`
    pub price: String,
    #[serde(default)]
    pub stock: i64,
    pub category_id: i64,
}

impl UpdateProductRequest {
    fn validate(self) -> Result<ProductUpdate, StatusError> {
        validation::require_name(&self.name, 200)?;
        validation::limit_description(self.description.as_deref(), 1000)?;

        let price = validation::require_positive_price(&self.price)?;
        let stock = validation::require_non_negative_stock(self.stock)?;

        Ok(ProductUpdate {
            name: self.name,
            description: self.description,
            price,
            stock,
            category_id: self.category_id,
        })
    }
}

/// Update Product Handler
#[endpoint(tags("products"), summary = "Update Product")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = json.into_inner().validate()?;

    let product = state
        .app
        .products
        .update_product(id.into_inner(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use catalog_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product_with_category, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{id}").put(handler))
    }

    #[tokio::test]
    async fn update_returns_refreshed_product() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(|id, update| *id == 7 && update.name == "Notebook")
            .return_once(|_, _| Ok(make_product_with_category(7, "Notebook", "Electronics")));

        let response: ProductResponse = TestClient::put("http://example.com/products/7")
            .json(&json!({
                "name": "Notebook",
                "price": "1299.99",
                "stock": 25,
                "category_id": 1
            }))
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Notebook");

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put("http://example.com/products/9")
            .json(&json!({
                "name": "Notebook",
                "price": "1299.99",
                "category_id": 1
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn update_invalid_price_rejected_before_service_call() -> TestResult {
        let res = TestClient::put("http://example.com/products/7")
            .json(&json!({
                "name": "Notebook",
                "price": "-10.00",
                "category_id": 1
            }))
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
