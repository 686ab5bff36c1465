//! In-process implementation of ProductRepository.
//!
//! Behaves like the MongoDB adapter (hex ObjectIds, `_id` order, partial
//! updates) so HTTP-level tests can run without a database.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<ObjectId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let id = ObjectId::new();
        let product = Product::new(id.to_hex(), input);

        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        if !input.is_empty() {
            product.apply_update(input);
        }
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let count = products.len() as u64;
        products.clear();
        tracing::debug!(deleted = count, "In-memory products cleared");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: Some("test".to_string()),
            price: 5.0,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(input("Lamp")).await.unwrap();

        let id = ObjectId::parse_str(&created.id).unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let repo = InMemoryProductRepository::new();
        repo.create(input("first")).await.unwrap();
        repo.create(input("second")).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let repo = InMemoryProductRepository::new();
        let result = repo
            .update(ObjectId::new(), UpdateProduct::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_changes_present_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(input("iPhone")).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        let updated = repo
            .update(
                id,
                UpdateProduct {
                    name: Some("laptop".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "laptop");
        assert_eq!(updated.description.as_deref(), Some("test"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(input("a")).await.unwrap();
        repo.create(input("b")).await.unwrap();
        repo.create(input("c")).await.unwrap();

        let id = ObjectId::parse_str(&a.id).unwrap();
        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
