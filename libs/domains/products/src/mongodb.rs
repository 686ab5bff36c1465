//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Name of the backing collection.
pub const COLLECTION: &str = "products";

/// Stored shape of a product: native ObjectId and BSON dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price: f64,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl ProductDocument {
    fn new(input: CreateProduct, now: DateTime<Utc>) -> Self {
        let now = to_bson_datetime(now);
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    fn into_product(self) -> ProductResult<Product> {
        Ok(Product {
            id: self.id.to_hex(),
            name: self.name,
            description: self.description,
            price: self.price,
            created_at: from_bson_datetime(self.created_at)?,
            updated_at: from_bson_datetime(self.updated_at)?,
        })
    }
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        ProductError::Internal(format!("stored timestamp {value} is out of range"))
    })
}

/// `$set` document for the present fields of `input` plus `updated_at`.
/// `None` when `input` carries nothing to change.
fn build_update_document(input: &UpdateProduct, now: DateTime<Utc>) -> Option<Document> {
    if input.is_empty() {
        return None;
    }

    let mut set = doc! { "updated_at": to_bson_datetime(now) };
    if let Some(ref name) = input.name {
        set.insert("name", name.as_str());
    }
    if let Some(ref description) = input.description {
        set.insert("description", description.as_str());
    }
    if let Some(price) = input.price {
        set.insert("price", price);
    }

    Some(doc! { "$set": set })
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let document = ProductDocument::new(input, Utc::now());

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created");
        document.into_product()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(ProductDocument::into_product).collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(ProductDocument::into_product)
            .transpose()
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let Some(update) = build_update_document(&input, Utc::now()) else {
            return self.get_by_id(id).await;
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated");
        }
        updated.map(ProductDocument::into_product).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        tracing::info!(deleted = result.deleted_count, "Products collection cleared");
        Ok(result.deleted_count)
    }
}
