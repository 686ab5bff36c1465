//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Service backed by the state's MongoDB database.
pub fn mongo_service(state: &AppState) -> ProductService<MongoProductRepository> {
    ProductService::new(MongoProductRepository::new(state.mongo.database()))
}

/// Create products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    handlers::router(service)
}
