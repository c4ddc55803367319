//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Search Products Handler
///
/// Substring search against product names and descriptions. The term must
/// be non-empty; that precondition is the HTTP layer's to enforce.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    term: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let term = term.into_inner();

    if term.trim().is_empty() {
        return Err(StatusError::bad_request().brief("search term cannot be empty"));
    }

    let products = state
        .app
        .products
        .search_products(term.trim())
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
