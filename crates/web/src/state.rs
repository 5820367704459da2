//! Shared application state

use std::sync::Arc;

use gatherly_tenancy::TenantResolver;

use crate::config::Config;

/// State shared across all request handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<TenantResolver>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = TenantResolver::new(config.tenancy());
        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            http: reqwest::Client::new(),
        }
    }
}
