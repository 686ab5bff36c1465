//! MongoDB test infrastructure
//!
//! `TestMongo` connects to `MONGO_TEST_URL` when it is set and otherwise
//! starts a throwaway MongoDB container.

use core_config::env_required;
use database::mongodb::{Database, MongoHandle, connect};
use database::{DatabaseError, DatabaseResult};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Connection string variable for integration tests.
pub const MONGO_TEST_URL: &str = "MONGO_TEST_URL";

/// Database used when a container is started for the test run.
pub const CONTAINER_DATABASE: &str = "products-test";

/// An open test connection, plus the container backing it if one was started.
///
/// Call [`TestMongo::close`] at the end of the suite. The container (if any)
/// is stopped and removed when the value is dropped.
pub struct TestMongo {
    handle: MongoHandle,
    url: String,
    container: Option<ContainerAsync<Mongo>>,
}

impl TestMongo {
    /// Connect to the server named by `MONGO_TEST_URL`.
    ///
    /// Fails with `ConfigError::MissingEnvVar` when the variable is unset.
    pub async fn from_env() -> DatabaseResult<Self> {
        let url = env_required(MONGO_TEST_URL)?;
        let handle = connect(&url).await?;

        tracing::info!(database = %handle.database().name(), "Test MongoDB ready (MONGO_TEST_URL)");

        Ok(Self {
            handle,
            url,
            container: None,
        })
    }

    /// `MONGO_TEST_URL` if set, otherwise a fresh `mongo:7` container.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::start().await;
    /// let db = mongo.database();
    /// // ... build repositories from `db` ...
    /// mongo.close().await;
    /// # }
    /// ```
    pub async fn start() -> Self {
        match Self::from_env().await {
            Ok(mongo) => mongo,
            Err(DatabaseError::Config(_)) => Self::start_container()
                .await
                .expect("Failed to start MongoDB test container"),
            Err(e) => panic!("Failed to connect to {MONGO_TEST_URL}: {e}"),
        }
    }

    async fn start_container() -> DatabaseResult<Self> {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let url = format!("mongodb://127.0.0.1:{host_port}/{CONTAINER_DATABASE}");
        let handle = connect(&url).await?;

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7 container)");

        Ok(Self {
            handle,
            url,
            container: Some(container),
        })
    }

    pub fn handle(&self) -> &MongoHandle {
        &self.handle
    }

    pub fn database(&self) -> &Database {
        self.handle.database()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `true` when this run owns a container rather than an external server.
    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    /// Close the driver connection pool, then drop the container.
    pub async fn close(self) {
        let Self {
            handle, container, ..
        } = self;
        handle.close().await;
        drop(container);
    }
}
