use std::path::Path;

use serde::Deserialize;

use crate::template::OutputTemplate;
use crate::ConfigError;

/// Command prefix used when the format file does not set one.
pub const DEFAULT_SET_LABEL_COMMAND: &str = "設定名稱";

#[derive(Debug, Deserialize)]
struct FormatFile {
    output_format: String,
    default_label: String,
    set_label_command: Option<String>,
}

/// Output template plus the label shown for identities that never set one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub template: OutputTemplate,
    pub default_label: String,
    pub set_label_command: String,
}

impl FormatConfig {
    #[must_use]
    pub fn new(output_format: &str, default_label: &str) -> Self {
        Self {
            template: OutputTemplate::parse(output_format),
            default_label: default_label.to_string(),
            set_label_command: DEFAULT_SET_LABEL_COMMAND.to_string(),
        }
    }
}

/// Load and validate the output format from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_format(path: &Path) -> Result<FormatConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_format(&content).map_err(|e| match e {
        FormatError::Yaml(source) => ConfigError::FormatParse {
            path: path.display().to_string(),
            source,
        },
        FormatError::Invalid(err) => err,
    })
}

enum FormatError {
    Yaml(serde_yaml::Error),
    Invalid(ConfigError),
}

fn parse_format(content: &str) -> Result<FormatConfig, FormatError> {
    let file: FormatFile = serde_yaml::from_str(content).map_err(FormatError::Yaml)?;
    validate_format(&file).map_err(FormatError::Invalid)?;

    let template = OutputTemplate::parse(&file.output_format);
    let unknown = template.unknown_placeholders();
    if !unknown.is_empty() {
        return Err(FormatError::Invalid(ConfigError::Validation(format!(
            "output_format references unknown placeholder(s): {}",
            unknown.join(", ")
        ))));
    }

    Ok(FormatConfig {
        template,
        default_label: file.default_label,
        set_label_command: file
            .set_label_command
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SET_LABEL_COMMAND.to_string()),
    })
}

fn validate_format(file: &FormatFile) -> Result<(), ConfigError> {
    if file.output_format.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output_format must be non-empty".to_string(),
        ));
    }

    if file
        .set_label_command
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "set_label_command must be non-empty when present".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
