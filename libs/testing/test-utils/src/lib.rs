//! Shared test utilities for the products workspace
//!
//! - `TestMongo`: MongoDB connection for integration suites, backed by
//!   `MONGO_TEST_URL` or a container (feature: "mongo")
//! - `TestClient`: in-process HTTP client over an axum `Router` (feature: "http")
//! - `assertions`: custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestClient, TestMongo, assertions::assert_object_id};
//!
//! #[tokio::test]
//! #[ignore]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::start().await;
//!     let client = TestClient::new(build_app(mongo.database()));
//!
//!     let response = client.post_json("/products", &json!({"name": "Lamp", "price": 3})).await;
//!     assert_eq!(response.status, StatusCode::CREATED);
//!     assert_object_id(&response.body["_id"], "created product");
//!
//!     mongo.close().await;
//! }
//! ```

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "http")]
pub use http::{TestClient, TestResponse};

#[cfg(feature = "mongo")]
pub use mongo::{CONTAINER_DATABASE, MONGO_TEST_URL, TestMongo};

/// Test assertion helpers
pub mod assertions {
    /// Assert that a JSON value is a 24-character hex ObjectId string
    pub fn assert_object_id(value: &serde_json::Value, context: &str) {
        let id = value
            .as_str()
            .unwrap_or_else(|| panic!("{context}: expected string id, got {value}"));
        assert!(
            id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit()),
            "{context}: expected 24 hex characters, got {id:?}"
        );
    }
}
