//! Health check endpoints

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::server::{HealthCheckFuture, health_router, run_health_checks};
use core_config::AppInfo;
use database::mongodb::{MongoHandle, check_health_detailed};

/// `GET /ready`: pings MongoDB when the service has a database.
async fn ready(State(mongo): State<Option<MongoHandle>>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture)> = Vec::new();
    if let Some(ref mongo) = mongo {
        let ping: HealthCheckFuture = Box::pin(async move {
            let status = check_health_detailed(mongo).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        });
        checks.push(("mongodb", ping));
    }
    run_health_checks(checks).await
}

/// `/health` and `/ready`.
pub fn router(app_info: AppInfo, mongo: Option<MongoHandle>) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(mongo)
        .merge(health_router(app_info))
}
