//! # Axum Helpers
//!
//! Shared HTTP plumbing for the products service.
//!
//! ## Modules
//!
//! - **[`errors`]**: failure values and the two-stage translation into `{ "message" }` responses
//! - **[`extractors`]**: `ObjectIdPath` and `ValidatedJson`, rejecting through the same chain
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router::<ApiDoc>(Router::new())?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {})
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    create_router_with_cors, health_router, run_health_checks, shutdown_signal,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{
    AppError, DEFAULT_ERROR_MESSAGE, ErrorResponse, FailureKind, HttpFailure,
    chain::{bad_request_handler, generic_error_handler, translate},
};

pub use extractors::{ObjectIdPath, ValidatedJson};
