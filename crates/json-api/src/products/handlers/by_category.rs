//! Products By Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Products By Category Handler
///
/// Returns the non-deleted products of one category. An absent or empty
/// category yields an empty list.
#[endpoint(tags("products"), summary = "List Products By Category")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .get_products_by_category(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::domain::products::MockProductsService;

    use crate::test_helpers::{make_product_model, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Router::with_path("products/category/{id}").get(handler),
        )
    }

    #[tokio::test]
    async fn by_category_returns_matching_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_products_by_category()
            .once()
            .withf(|category_id| *category_id == 2)
            .return_once(|_| Ok(vec![make_product_model(5, "Programming Book", 2)]));

        let response: Vec<ProductResponse> =
            TestClient::get("http://example.com/products/category/2")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.len(), 1);
        assert_eq!(response[0].category_id, 2);

        Ok(())
    }

    #[tokio::test]
    async fn by_category_absent_category_returns_empty_list() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_products_by_category()
            .once()
            .return_once(|_| Ok(vec![]));

        let response: Vec<ProductResponse> =
            TestClient::get("http://example.com/products/category/99")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert!(response.is_empty());

        Ok(())
    }
}
