//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
///
/// `database` and `cache` are optional so the router can run over mock
/// services; without a cache no rate limit is enforced.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub config: Arc<Config>,
    pub database: Option<Arc<Database>>,
    pub cache: Option<Arc<Cache>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            config.clone(),
        ));

        Self {
            services,
            config: Arc::new(config),
            database: Some(database),
            cache: Some(cache),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(services: Arc<dyn ServiceContainer>, config: Config) -> Self {
        Self {
            services,
            config: Arc::new(config),
            database: None,
            cache: None,
        }
    }
}
