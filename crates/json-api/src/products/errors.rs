//! Product error mapping.

use salvo::http::StatusError;
use tracing::error;

use catalog_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("product not found"),
        ProductsServiceError::DuplicateName => {
            StatusError::bad_request().brief("product name already exists")
        }
        ProductsServiceError::UnknownCategory => {
            StatusError::bad_request().brief("category does not exist")
        }
        ProductsServiceError::MissingAfterSave => {
            error!("product row missing after a successful save");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
