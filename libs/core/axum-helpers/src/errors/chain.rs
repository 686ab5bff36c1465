//! The two-stage error translation chain.
//!
//! Stages always run in the same order and each failure produces exactly one
//! response: a failure answered by [`bad_request_handler`] never reaches
//! [`generic_error_handler`].

use std::any::Any;
use std::ops::ControlFlow;

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{
    DEFAULT_BAD_REQUEST_MESSAGE, DEFAULT_ERROR_MESSAGE, ErrorResponse, FailureKind, HttpFailure,
};

/// Stage 1: answer bad input with 400, hand everything else on.
///
/// A failure is bad input when it declares status 400 or when it is a
/// validation or cast failure raised by the data layer.
pub fn bad_request_handler(failure: HttpFailure) -> ControlFlow<Response, HttpFailure> {
    if failure.status != Some(StatusCode::BAD_REQUEST) && !failure.kind.is_bad_input() {
        return ControlFlow::Continue(failure);
    }

    let message = failure
        .message
        .unwrap_or_else(|| DEFAULT_BAD_REQUEST_MESSAGE.to_string());

    tracing::info!(kind = ?failure.kind, %message, "Bad request");
    ControlFlow::Break(render(StatusCode::BAD_REQUEST, message))
}

/// Stage 2: answer with the declared status, or 500.
pub fn generic_error_handler(failure: HttpFailure) -> Response {
    let status = failure.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = failure
        .message
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

    if status.is_server_error() {
        tracing::error!(kind = ?failure.kind, status = status.as_u16(), %message, "Request failed");
    } else {
        tracing::info!(kind = ?failure.kind, status = status.as_u16(), %message, "Request rejected");
    }

    render(status, message)
}

/// Run both stages in order.
pub fn translate(failure: HttpFailure) -> Response {
    match bad_request_handler(failure) {
        ControlFlow::Break(response) => response,
        ControlFlow::Continue(failure) => generic_error_handler(failure),
    }
}

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri) -> Response {
    HttpFailure::not_found(format!("Cannot find {}", uri.path())).into_response()
}

/// Response for a handler panic caught by `tower_http::catch_panic`.
///
/// The panic payload is logged but never echoed to the client.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(panic = %detail, "Handler panicked");
    translate(HttpFailure::new(FailureKind::Unclassified))
}

fn render(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_message(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        body.message
    }

    #[tokio::test]
    async fn test_validation_failure_is_answered_by_stage_one() {
        let failure = HttpFailure::validation("name: Path `name` is required.");

        let ControlFlow::Break(response) = bad_request_handler(failure) else {
            panic!("validation failures must not be forwarded");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(response).await, "name: Path `name` is required.");
    }

    #[tokio::test]
    async fn test_cast_failure_is_bad_request() {
        let response = translate(HttpFailure::cast("Cast to ObjectId failed"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_explicit_400_is_answered_by_stage_one() {
        let failure = HttpFailure::new(FailureKind::Unclassified).with_status(StatusCode::BAD_REQUEST);

        let ControlFlow::Break(response) = bad_request_handler(failure) else {
            panic!("explicit 400 must be answered by stage one");
        };
        assert_eq!(body_message(response).await, DEFAULT_BAD_REQUEST_MESSAGE);
    }

    #[test]
    fn test_other_failures_pass_through_unchanged() {
        let failure = HttpFailure::not_found("Product 1 not found");

        match bad_request_handler(failure.clone()) {
            ControlFlow::Continue(forwarded) => assert_eq!(forwarded, failure),
            ControlFlow::Break(_) => panic!("not-found must reach the fallback stage"),
        }
    }

    #[test]
    fn test_bad_input_kind_wins_over_declared_status() {
        let failure = HttpFailure::validation("bad").with_status(StatusCode::UNPROCESSABLE_ENTITY);
        let response = translate(failure);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fallback_uses_declared_status() {
        let response = translate(HttpFailure::not_found("Product 1 not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_message(response).await, "Product 1 not found");
    }

    #[tokio::test]
    async fn test_fallback_defaults_to_500_and_default_message() {
        let response = generic_error_handler(HttpFailure::new(FailureKind::Unclassified));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_message(response).await, DEFAULT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_fallback_keeps_message_without_status() {
        let response = translate(HttpFailure::internal("connection reset"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_message(response).await, "connection reset");
    }

    #[tokio::test]
    async fn test_not_found_fallback_route() {
        let response = not_found("/nowhere".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_message(response).await, "Cannot find /nowhere");
    }

    #[tokio::test]
    async fn test_panic_response_hides_payload() {
        let response = panic_response(Box::new("index out of bounds".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_message(response).await, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_body_is_message_only() {
        let value = serde_json::to_value(ErrorResponse {
            message: "x".into(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "message": "x" }));
    }
}
