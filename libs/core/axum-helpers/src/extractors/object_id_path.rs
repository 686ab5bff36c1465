//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a single MongoDB `ObjectId` path parameter.
///
/// A value that is not 24 hex characters is rejected as a cast failure, which
/// the error chain answers with 400. A well-formed id that matches nothing is
/// left for the handler to report as 404.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl ObjectIdPath {
    pub fn parse(value: &str) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(value).map_err(|_| {
            AppError::Cast(format!(
                "Cast to ObjectId failed for value \"{value}\" at path \"_id\""
            ))
        })
    }
}

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await?;
        Self::parse(&id).map(ObjectIdPath)
    }
}
