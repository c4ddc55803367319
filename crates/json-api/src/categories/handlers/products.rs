//! Get Category With Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::{errors::into_status_error, models::CategoryProductsResponse},
    extensions::*,
    state::State,
};

/// Get Category With Products Handler
///
/// Returns a category together with its non-deleted products.
#[endpoint(tags("categories"), summary = "Get Category With Products")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CategoryProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let entry = state
        .app
        .categories
        .get_category_with_products(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entry.into()))
}
