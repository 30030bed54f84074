//! Shared configuration for the rarespawn alert formatter.
//!
//! Holds the process configuration read from the environment, the output
//! template / default label file, and the static species-name table. Nothing
//! here performs network I/O.

pub mod app_config;
pub mod config;
pub mod format;
pub mod names;
pub mod template;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use format::{load_format, FormatConfig, DEFAULT_SET_LABEL_COMMAND};
pub use names::{load_names, NameTable};
pub use template::{OutputTemplate, Placeholder, Segment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse format file {path}: {source}")]
    FormatParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse name table {path}: {source}")]
    NamesParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
