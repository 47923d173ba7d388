use thiserror::Error;

/// Error type for configuration and I/O failures around the flow engine.
///
/// Data problems (empty sides, unbalanced totals, dangling indices) are never
/// reported through this type; they surface as data on the `FlowGraph`.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid category pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
