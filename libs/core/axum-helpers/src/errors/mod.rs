//! Failure values and their translation into HTTP responses.
//!
//! Every error that reaches the HTTP boundary is normalised into an
//! [`HttpFailure`] (kind + optional declared status + optional message) and
//! then rendered by the two ordered stages in [`chain`]:
//!
//! 1. [`chain::bad_request_handler`] answers 400 for validation, cast, or
//!    explicit-400 failures and forwards everything else;
//! 2. [`chain::generic_error_handler`] answers with the declared status, or 500.
//!
//! Every error body has the same shape: `{ "message": "..." }`.

pub mod chain;
pub mod responses;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message used by the fallback stage when a failure carries no text.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred. We are looking into it.";

/// Message used by the bad-request stage when a failure carries no text.
pub const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Bad request";

/// Coarse classification of a failure, used to pick the handling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required field is missing or a field breaks a schema rule
    Validation,
    /// A value could not be cast to the expected type (e.g. a malformed id)
    Cast,
    /// The addressed resource does not exist
    NotFound,
    /// Anything else: driver, I/O, programming errors, panics
    Unclassified,
}

impl FailureKind {
    /// Kinds that always mean the client sent bad input.
    pub fn is_bad_input(self) -> bool {
        matches!(self, FailureKind::Validation | FailureKind::Cast)
    }
}

/// A failure on its way to becoming an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub kind: FailureKind,
    /// Status declared by whoever raised the failure
    pub status: Option<StatusCode>,
    pub message: Option<String>,
}

impl HttpFailure {
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            status: None,
            message: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation).with_message(message)
    }

    pub fn cast(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Cast).with_message(message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound)
            .with_status(StatusCode::NOT_FOUND)
            .with_message(message)
    }

    /// An unclassified failure that explicitly declares 400.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified)
            .with_status(StatusCode::BAD_REQUEST)
            .with_message(message)
    }

    /// An unclassified failure with no declared status; renders as 500.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified).with_message(message)
    }
}

impl IntoResponse for HttpFailure {
    fn into_response(self) -> Response {
        chain::translate(self)
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,
}

/// Rejections raised by the request extractors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("{}", .0.body_text())]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    PathRejection(#[from] PathRejection),

    #[error("{}", validation_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Cast(String),
}

impl From<AppError> for HttpFailure {
    fn from(err: AppError) -> Self {
        let message = err.to_string();
        match err {
            AppError::JsonExtractorRejection(rejection) => match rejection {
                JsonRejection::JsonDataError(_) => HttpFailure::validation(message),
                JsonRejection::JsonSyntaxError(_) => HttpFailure::bad_request(message),
                other => HttpFailure::new(FailureKind::Unclassified)
                    .with_status(other.status())
                    .with_message(message),
            },
            AppError::PathRejection(rejection) => HttpFailure::new(FailureKind::Unclassified)
                .with_status(rejection.status())
                .with_message(message),
            AppError::Validation(_) => HttpFailure::validation(message),
            AppError::Cast(_) => HttpFailure::cast(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        HttpFailure::from(self).into_response()
    }
}

/// Flatten `validator` errors into one line, fields in alphabetical order:
/// `Validation failed: name: length; price: range`.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let details = fields
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| e.message.as_deref().unwrap_or(&*e.code).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {reasons}")
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!("Validation failed: {details}")
}
