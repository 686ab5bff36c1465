//! MongoDB connector and utilities
//!
//! The connection is an explicit [`MongoHandle`]: acquire it with
//! [`connect_from_config`], release it with [`MongoHandle::close`].

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, MongoHandle};
pub use health::{check_health, check_health_detailed, HealthStatus};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
