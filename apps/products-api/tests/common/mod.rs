//! Scenario list shared by the in-memory and MongoDB suites.
#![allow(dead_code)]

use axum::http::StatusCode;
use core_config::app_info;
use database::mongodb::MongoHandle;
use domain_products::{CreateProduct, Product, ProductRepository, ProductService};
use futures::FutureExt;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};
use test_utils::{TestClient, assertions::assert_object_id};

/// Well-formed ObjectId that is never stored.
pub const ABSENT_ID: &str = "123456123456123456123456";

pub fn valid_product() -> Value {
    json!({ "name": "iPhone", "description": "Good phone", "price": 10000 })
}

pub fn product_without_name() -> Value {
    json!({ "description": "Good phone", "price": 10000 })
}

/// One application instance plus direct access to its storage.
pub struct ProductsSuite<R: ProductRepository + 'static> {
    pub client: TestClient,
    pub service: ProductService<R>,
}

impl<R: ProductRepository + 'static> ProductsSuite<R> {
    /// Build the app over `repository` and seed one product.
    pub async fn start(repository: R, mongo: Option<MongoHandle>) -> Self {
        let service = ProductService::new(repository);
        let app = products_api::app(service.clone(), app_info!(), mongo)
            .expect("Failed to build router");

        let suite = Self {
            client: TestClient::new(app),
            service,
        };
        suite.reset().await;
        suite.seed().await;
        suite
    }

    async fn reset(&self) {
        self.service
            .delete_all_products()
            .await
            .expect("Failed to clear products");
    }

    async fn seed(&self) {
        let input: CreateProduct =
            serde_json::from_value(valid_product()).expect("valid seed payload");
        self.service
            .create_product(input)
            .await
            .expect("Failed to seed product");
    }

    /// First stored product, read straight from storage.
    pub async fn first_product(&self) -> Product {
        self.service
            .list_products()
            .await
            .expect("Failed to list products")
            .into_iter()
            .next()
            .expect("expected at least one stored product")
    }

    /// Delete every product.
    pub async fn teardown(&self) -> u64 {
        self.service
            .delete_all_products()
            .await
            .expect("Failed to delete products")
    }

    /// Run every scenario in order through [`Self::guarded`].
    pub async fn run<F>(&self, release: F)
    where
        F: Future<Output = ()>,
    {
        self.guarded(run_scenarios(self), release).await;
    }

    /// Await `scenarios`, then tear down even if they panicked.
    ///
    /// `release` runs after the teardown (e.g. closing the DB connection)
    /// and before any panic is resumed.
    pub async fn guarded<S, F>(&self, scenarios: S, release: F)
    where
        S: Future<Output = ()>,
        F: Future<Output = ()>,
    {
        let outcome = AssertUnwindSafe(scenarios).catch_unwind().await;

        self.teardown().await;
        release.await;

        if let Err(panic) = outcome {
            resume_unwind(panic);
        }
    }
}

/// The full ordered scenario list. Later steps rely on earlier ones: after the
/// seeded product is deleted, the one created by the POST scenario remains.
pub async fn run_scenarios<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    create_valid_returns_201_with_id(suite).await;
    create_without_name_returns_400(suite).await;
    list_returns_200_with_body(suite).await;
    get_absent_returns_404(suite).await;
    get_present_returns_200(suite).await;
    delete_present_returns_204(suite).await;
    delete_absent_returns_404(suite).await;
    put_present_returns_200(suite).await;
    put_absent_returns_404(suite).await;
    put_changes_name(suite).await;
    put_returns_name_as_string(suite).await;
}

pub async fn create_valid_returns_201_with_id<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let response = suite.client.post_json("/products", &valid_product()).await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_object_id(&response.body["_id"], "created product");
}

pub async fn create_without_name_returns_400<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let response = suite
        .client
        .post_json("/products", &product_without_name())
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().is_some_and(|m| m.contains("name")));
}

pub async fn list_returns_200_with_body<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let response = suite.client.get("/products").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_array());
}

pub async fn get_absent_returns_404<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    let response = suite.client.get(&format!("/products/{ABSENT_ID}")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.message().is_some());
}

pub async fn get_present_returns_200<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    let product = suite.first_product().await;
    let response = suite.client.get(&format!("/products/{}", product.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], product.id);
}

pub async fn delete_present_returns_204<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let product = suite.first_product().await;
    let uri = format!("/products/{}", product.id);

    let response = suite.client.delete(&uri).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, Value::Null);

    let response = suite.client.get(&uri).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

pub async fn delete_absent_returns_404<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let response = suite.client.delete(&format!("/products/{ABSENT_ID}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

pub async fn put_present_returns_200<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    let product = suite.first_product().await;
    let response = suite
        .client
        .put_json(&format!("/products/{}", product.id), &valid_product())
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

pub async fn put_absent_returns_404<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    let response = suite
        .client
        .put_json(&format!("/products/{ABSENT_ID}"), &valid_product())
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

pub async fn put_changes_name<R: ProductRepository + 'static>(suite: &ProductsSuite<R>) {
    let product = suite.first_product().await;
    let response = suite
        .client
        .put_json(&format!("/products/{}", product.id), &json!({ "name": "laptop" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let id = ObjectId::parse_str(&product.id).expect("stored id is an ObjectId");
    let stored = suite
        .service
        .get_product(id)
        .await
        .expect("updated product is still stored");
    assert_eq!(stored.name, "laptop");
    assert_eq!(stored.price, product.price);
}

pub async fn put_returns_name_as_string<R: ProductRepository + 'static>(
    suite: &ProductsSuite<R>,
) {
    let product = suite.first_product().await;
    let response = suite
        .client
        .put_json(&format!("/products/{}", product.id), &json!({ "name": "laptop" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["name"].is_string());
    assert_eq!(response.body["name"], "laptop");
}
