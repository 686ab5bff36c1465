use axum::response::{IntoResponse, Response};
use axum_helpers::HttpFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for HttpFailure {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::NotFound(_) => HttpFailure::not_found(message),
            ProductError::Validation(_) => HttpFailure::validation(message),
            ProductError::Database(_) | ProductError::Internal(_) => HttpFailure::internal(message),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        HttpFailure::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(axum_helpers::errors::validation_message(&err))
    }
}
