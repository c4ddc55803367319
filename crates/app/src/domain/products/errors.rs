//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product name already exists")]
    DuplicateName,

    #[error("referenced category does not exist")]
    UnknownCategory,

    #[error("product row missing after save")]
    MissingAfterSave,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateName,
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownCategory,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
