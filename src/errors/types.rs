use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClarityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("{0}")]
    Parse(String),

    #[error("Upstream data unavailable: {0}")]
    UpstreamData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
