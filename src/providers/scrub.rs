use crate::error::LlmError;

const MAX_API_ERROR_CHARS: usize = 200;

/// Collapse whitespace and cap the length of an error body for display.
pub fn sanitize_api_error(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= MAX_API_ERROR_CHARS {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    LlmError::Request {
        provider: provider.to_string(),
        message: format!("HTTP {status}: {}", sanitize_api_error(&body)),
    }
    .into()
}
