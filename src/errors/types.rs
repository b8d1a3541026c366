use thiserror::Error;

#[derive(Debug, Error)]
pub enum VexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Unparsable LLM output: {message}: {raw:?}")]
    MalformedOutput { message: String, raw: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
