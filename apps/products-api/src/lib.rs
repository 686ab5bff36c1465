//! Products API
//!
//! REST service for the `products` collection.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (HTTP/JSON)
//! create_router (Swagger UI, error fallback, panic catcher, tracing, CORS)
//!   ↓
//! domain_products::handlers
//!   ↓
//! ProductService → ProductRepository (MongoDB or in-memory)
//! ```
//!
//! ## Modules
//!
//! - `api`: route assembly and health endpoints
//! - `config`: environment-driven configuration
//! - `openapi`: combined OpenAPI document
//! - `state`: resources owned by the running service

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use core_config::AppInfo;
use database::mongodb::MongoHandle;
use domain_products::{ProductRepository, ProductService};
use std::io;

pub use config::Config;
pub use state::AppState;

/// Full application router over any product repository.
///
/// `mongo` is pinged by `/ready`; pass `None` when the service runs without
/// a database (in-memory storage).
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but invalid.
pub fn app<R: ProductRepository + 'static>(
    service: ProductService<R>,
    app_info: AppInfo,
    mongo: Option<MongoHandle>,
) -> io::Result<Router> {
    let apis = api::routes(service).merge(api::health::router(app_info, mongo));
    axum_helpers::create_router::<openapi::ApiDoc>(apis)
}
