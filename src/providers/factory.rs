use super::client::CompletionClient;
use super::ollama::OllamaProvider;
use super::traits::Provider;
use crate::config::ProviderConfig;
use std::sync::Arc;
use std::time::Duration;

/// Build the completion backend described by `[provider]`.
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn Provider> {
    Arc::new(OllamaProvider::new(
        Some(&config.base_url),
        Duration::from_secs(config.timeout_secs),
    ))
}

/// Build the error-absorbing client the agent code talks to.
pub fn create_client(config: &ProviderConfig) -> CompletionClient {
    CompletionClient::new(create_provider(config), config.model.clone())
        .with_temperature(config.temperature)
}
