//! Database connection management for the products service.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection handle, config and health checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let handle = connect_from_config(&config).await?;
//! let products = handle.database().collection::<Document>("products");
//! // ...
//! handle.close().await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
