//! Product Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Validates input and turns "no such record" from the port into
/// [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Shared handle to the underlying repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_hex()))
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository
            .update(id, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_hex()))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id.to_hex()))
        }
    }

    /// Remove every product. Used by test teardown.
    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) -> ProductResult<u64> {
        self.repository.delete_all().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample(id: ObjectId, name: &str) -> Product {
        Product {
            id: id.to_hex(),
            name: name.to_string(),
            description: None,
            price: 999.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_touching_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let err = service
            .create_product(CreateProduct {
                name: String::new(),
                description: None,
                price: 1.0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Validation(ref m) if m.contains("name")));
    }

    #[tokio::test]
    async fn test_create_delegates_to_repository() {
        let id = ObjectId::new();
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .times(1)
            .returning(move |input| Ok(sample(id, &input.name)));

        let service = ProductService::new(repo);
        let product = service
            .create_product(CreateProduct {
                name: "iPhone".to_string(),
                description: None,
                price: 999.0,
            })
            .await
            .unwrap();

        assert_eq!(product.id, id.to_hex());
        assert_eq!(product.name, "iPhone");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let id = ObjectId::new();
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_product(id).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ref hex) if *hex == id.to_hex()));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(repo);
        let err = service
            .update_product(ObjectId::new(), UpdateProduct::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_validates_before_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let err = service
            .update_product(
                ObjectId::new(),
                UpdateProduct {
                    price: Some(-3.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let present = ObjectId::new();
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .returning(move |id| Ok(id == present));

        let service = ProductService::new(repo);
        assert!(service.delete_product(present).await.is_ok());
        assert!(matches!(
            service.delete_product(ObjectId::new()).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|| Err(ProductError::Database("connection reset".into())));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Database(_))
        ));
    }
}
