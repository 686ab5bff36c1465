//! Reusable OpenAPI response types so every route documents the same error body.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "message": "An unexpected error occurred. We are looking into it."
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation failed",
    content_type = "application/json",
    example = json!({
        "message": "Validation failed: name: length"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed identifier",
    content_type = "application/json",
    example = json!({
        "message": "Cast to ObjectId failed for value \"abc\" at path \"_id\""
    })
)]
pub struct BadRequestCastResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "Product with id 64b7f0c2a1e4d3b2c1a09876 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
