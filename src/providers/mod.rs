pub mod client;
pub mod factory;
pub mod ollama;
pub mod scrub;
pub mod traits;

pub use client::CompletionClient;
pub use factory::{create_client, create_provider};
pub use ollama::OllamaProvider;
pub use traits::Provider;
