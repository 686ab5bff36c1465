use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Storage port for products.
///
/// Lookups by id return `Ok(None)` / `Ok(false)` when nothing matches; the
/// service decides that this means 404.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its assigned `_id`
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Apply the present fields and return the product after the update
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// `true` when a product was removed
    async fn delete(&self, id: ObjectId) -> ProductResult<bool>;

    /// Remove every product, returning how many were deleted
    async fn delete_all(&self) -> ProductResult<u64>;
}
