use super::scrub::api_error;
use super::traits::Provider;
use crate::error::LlmError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Self {
        Self {
            base_url: base_url
                .unwrap_or("http://localhost:11434")
                .trim_end_matches('/')
                .to_string(),
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request<'a>(
        prompt: &'a str,
        model: &'a str,
        temperature: Option<f64>,
    ) -> GenerateRequest<'a> {
        GenerateRequest {
            model,
            prompt,
            stream: false,
            options: temperature.map(|temperature| Options { temperature }),
        }
    }

    async fn call_api(
        &self,
        prompt: &str,
        model: &str,
        temperature: Option<f64>,
    ) -> anyhow::Result<String> {
        let request = Self::build_request(prompt, model, temperature);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    LlmError::Unreachable {
                        provider: "Ollama".into(),
                        url: self.base_url.clone(),
                        message: e.to_string(),
                    }
                } else {
                    LlmError::Request {
                        provider: "Ollama".into(),
                        message: e.to_string(),
                    }
                }
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotFound {
                provider: "Ollama".into(),
                model: model.to_string(),
            }
            .into());
        }
        if !response.status().is_success() {
            return Err(api_error("Ollama", response).await);
        }

        let body: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| LlmError::MalformedResponse {
                    provider: "Ollama".into(),
                    message: e.to_string(),
                })?;
        Ok(body.response)
    }
}

impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        temperature: Option<f64>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self.call_api(prompt, model, temperature))
    }
}
