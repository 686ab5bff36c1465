//! Application state management

use database::mongodb::MongoHandle;

/// Resources owned by the running service.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo: MongoHandle,
}
