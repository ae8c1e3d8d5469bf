use crate::application::registry::ProviderRegistry;
use crate::domain::error::QtError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use std::sync::Arc;

/// Everything resolved once at start-up and shared read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ProviderRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, QtError> {
        let registry = ProviderRegistry::from_settings(create_client()?, &config.translation);

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }
}
