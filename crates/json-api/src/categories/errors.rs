//! Category error mapping.

use salvo::http::StatusError;
use tracing::error;

use catalog_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found().brief("category not found"),
        CategoriesServiceError::DuplicateName => {
            StatusError::bad_request().brief("category name already exists")
        }
        CategoriesServiceError::HasProducts => {
            StatusError::bad_request().brief("cannot delete a category that contains products")
        }
        CategoriesServiceError::MissingAfterSave => {
            error!("category row missing after a successful save");

            StatusError::internal_server_error()
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
