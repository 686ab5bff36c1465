use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// An open MongoDB connection scoped to one database.
///
/// The handle owns the driver [`Client`] and its pool. Cloning is cheap and
/// shares the pool. Call [`MongoHandle::close`] once on shutdown (or at the
/// end of a test suite) to drain the pool explicitly.
#[derive(Clone, Debug)]
pub struct MongoHandle {
    client: Client,
    database: Database,
}

impl MongoHandle {
    pub fn new(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Round-trip a `ping` command against the server.
    pub async fn ping(&self) -> DatabaseResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    /// Close every pooled connection and end server sessions.
    pub async fn close(self) {
        let name = self.database.name().to_string();
        self.client.shutdown().await;
        info!(database = %name, "MongoDB connection closed");
    }
}

/// Connect with driver defaults for pool size and timeouts.
///
/// # Example
/// ```ignore
/// let handle = database::mongodb::connect("mongodb://localhost:27017/shop").await?;
/// ```
pub async fn connect(url: &str) -> DatabaseResult<MongoHandle> {
    connect_from_config(&MongoConfig::from_url(url)).await
}

/// Connect using a [`MongoConfig`] and verify the server answers a `ping`.
///
/// There is no retry: if the server is unreachable the error is returned to
/// the caller immediately.
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<MongoHandle> {
    info!(url = %config.redacted_url(), database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    let handle = MongoHandle::new(client, &config.database);

    handle.ping().await?;

    info!(database = %config.database, "Successfully connected to MongoDB");
    Ok(handle)
}
