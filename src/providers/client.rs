use super::traits::Provider;
use std::sync::Arc;

/// Caller-facing completion entry point.
///
/// Always yields text: provider failures become an `Error: ...` string so the
/// loop and the graph stages can keep going.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: Option<f64>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> String {
        match self
            .provider
            .complete(prompt, &self.model, self.temperature)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    model = %self.model,
                    error = %e,
                    "completion request failed"
                );
                format!("Error: {e}")
            }
        }
    }
}
