use std::time::Instant;
use tracing::debug;

use super::MongoHandle;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// `true` when the server answers a `ping`.
pub async fn check_health(handle: &MongoHandle) -> bool {
    handle.ping().await.is_ok()
}

/// Ping the server and report latency plus any error.
///
/// # Example
/// ```ignore
/// let status = check_health_detailed(&handle).await;
/// if !status.healthy {
///     tracing::warn!(error = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(handle: &MongoHandle) -> HealthStatus {
    let start = Instant::now();
    let result = handle.ping().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    debug!(healthy = result.is_ok(), response_time_ms, "MongoDB health check");

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms,
    }
}
