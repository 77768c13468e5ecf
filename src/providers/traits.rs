use std::future::Future;
use std::pin::Pin;

/// A text-completion backend: one prompt in, one response text out.
///
/// Implementations report failures as errors; [`CompletionClient`] is the
/// layer that folds them into text for the agent code.
///
/// [`CompletionClient`]: super::CompletionClient
pub trait Provider: Send + Sync {
    /// Short provider label used in logs and error text.
    fn name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        temperature: Option<f64>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
