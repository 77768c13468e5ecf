use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `reagent`.
///
/// These never reach the interactive surface as faults: the completion client,
/// the tool registry and the approval gate all fold them into text. They exist
/// so that the edges (config loading, graph compilation, provider calls) can be
/// matched on by library callers.
#[derive(Debug, Error)]
pub enum ReagentError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Tools ───────────────────────────────────────────────────────────
    #[error("tool: {0}")]
    Tool(#[from] ToolError),

    // ── Graph ───────────────────────────────────────────────────────────
    #[error("graph: {0}")]
    Graph(#[from] GraphError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {path}: {message}")]
    Load { path: String, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("could not connect to {provider} at {url}. Is it running? ({message})")]
    Unreachable {
        provider: String,
        url: String,
        message: String,
    },

    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("model {model} not found on provider {provider}")]
    ModelNotFound { provider: String, model: String },

    #[error("provider {provider} returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },
}

// ─── Tool errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid argument for {tool}: {message}")]
    InvalidArgument { tool: String, message: String },

    #[error("calculation failed: {0}")]
    Calculation(String),
}

// ─── Graph errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("stage {stage} has no outgoing edge")]
    MissingEdge { stage: String },

    #[error("stage {stage} has more than one outgoing edge")]
    DuplicateEdge { stage: String },

    #[error("cycle detected at stage {stage}")]
    Cycle { stage: String },

    #[error("terminal state is unreachable from {entry}")]
    Unterminated { entry: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ReagentError>;
