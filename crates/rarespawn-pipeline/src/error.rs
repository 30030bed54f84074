use thiserror::Error;

/// Errors that escape the pipeline. Extraction misses and translation
/// failures never do; they are recovered where they happen.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to persist labels to {path}: {source}")]
    LabelPersist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read labels from {path}: {source}")]
    LabelLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode labels: {0}")]
    LabelDecode(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] rarespawn_core::ConfigError),
}

/// Errors returned by a [`crate::Translator`].
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation timed out after {0} ms")]
    Timeout(u64),

    #[error("translation service returned no text")]
    EmptyResponse,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
