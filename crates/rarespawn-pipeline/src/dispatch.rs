//! Entry point: classify each message as a label command or alert data and
//! produce the reply text.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use rarespawn_core::{load_format, FormatConfig};

use crate::error::PipelineError;
use crate::extract::extract;
use crate::labels::LabelStore;
use crate::render::render;
use crate::resolve::Resolver;
use crate::types::RawMessage;

/// How one inbound message is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Alert text to format.
    Data,
    /// Label command; the payload is already trimmed and may be empty.
    SetLabel(&'a str),
}

/// Classify `text` against the configured command prefix.
#[must_use]
pub fn classify<'a>(text: &'a str, set_label_prefix: &str) -> Command<'a> {
    match text.trim().strip_prefix(set_label_prefix) {
        Some(rest) if !set_label_prefix.is_empty() => Command::SetLabel(rest.trim()),
        _ => Command::Data,
    }
}

/// Outcome of handling one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Rendered(String),
    LabelSet(String),
    Usage { command: String },
    PersistFailed,
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Rendered(text) => f.write_str(text),
            Reply::LabelSet(label) => write!(f, "✅ 名稱已設定為：{label}"),
            Reply::Usage { command } => write!(f, "⚠️ 請輸入名稱，例如：{command} 小明"),
            Reply::PersistFailed => f.write_str("❌ 名稱儲存失敗，請稍後再試"),
        }
    }
}

/// The assembled formatter: resolver, label store, and the current format.
pub struct Pipeline {
    format: RwLock<Arc<FormatConfig>>,
    format_path: Option<PathBuf>,
    resolver: Resolver,
    labels: Arc<LabelStore>,
}

impl Pipeline {
    #[must_use]
    pub fn new(format: FormatConfig, resolver: Resolver, labels: Arc<LabelStore>) -> Self {
        Self {
            format: RwLock::new(Arc::new(format)),
            format_path: None,
            resolver,
            labels,
        }
    }

    /// Remember where the format came from so [`Pipeline::reload`] can re-read it.
    #[must_use]
    pub fn with_format_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.format_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn format(&self) -> Arc<FormatConfig> {
        Arc::clone(&self.format.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    /// Handle one message and return the text to send back.
    pub async fn handle(&self, identity: &str, text: &str) -> String {
        self.dispatch(&RawMessage::new(identity, text))
            .await
            .to_string()
    }

    pub async fn dispatch(&self, message: &RawMessage) -> Reply {
        let format = self.format();

        match classify(&message.text, &format.set_label_command) {
            Command::SetLabel("") => {
                tracing::debug!(identity = %message.identity, "label command without a label");
                Reply::Usage {
                    command: format.set_label_command.clone(),
                }
            }
            Command::SetLabel(label) => match self.labels.set(&message.identity, label).await {
                Ok(()) => {
                    tracing::info!(identity = %message.identity, label, "custom label updated");
                    Reply::LabelSet(label.to_string())
                }
                Err(e) => {
                    tracing::error!(identity = %message.identity, error = %e, "failed to persist custom label");
                    Reply::PersistFailed
                }
            },
            Command::Data => {
                let fields = extract(&message.text);
                tracing::debug!(identity = %message.identity, ?fields, "fields extracted");
                let resolved = self.resolver.resolve(fields).await;
                let label = self
                    .labels
                    .get_or(&message.identity, &format.default_label)
                    .await;
                Reply::Rendered(render(&format.template, &resolved, &label))
            }
        }
    }

    /// Swap in a new format. Renders already in flight keep the old one.
    pub fn replace_format(&self, format: FormatConfig) {
        *self.format.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(format);
    }

    /// Re-read the format file given to [`Pipeline::with_format_path`].
    ///
    /// On error the current format stays active.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the file cannot be loaded or is
    /// invalid. Without a format path this is a no-op.
    pub fn reload(&self) -> Result<(), PipelineError> {
        let Some(path) = &self.format_path else {
            tracing::debug!("reload requested without a format path; nothing to do");
            return Ok(());
        };
        let format = load_format(path)?;
        self.replace_format(format);
        tracing::info!(path = %path.display(), "output format reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_detects_command_and_payload() {
        assert_eq!(classify("設定名稱 Bob", "設定名稱"), Command::SetLabel("Bob"));
        assert_eq!(classify("  設定名稱   Bob  ", "設定名稱"), Command::SetLabel("Bob"));
        assert_eq!(classify("設定名稱", "設定名稱"), Command::SetLabel(""));
        assert_eq!(classify("設定名稱小明", "設定名稱"), Command::SetLabel("小明"));
    }

    #[test]
    fn classify_treats_everything_else_as_data() {
        assert_eq!(classify("***Pikachu*** 設定名稱", "設定名稱"), Command::Data);
        assert_eq!(classify("", "設定名稱"), Command::Data);
        assert_eq!(classify("anything", ""), Command::Data);
    }

    #[test]
    fn reply_texts() {
        assert_eq!(Reply::LabelSet("Bob".into()).to_string(), "✅ 名稱已設定為：Bob");
        assert_eq!(
            Reply::Usage {
                command: "設定名稱".into()
            }
            .to_string(),
            "⚠️ 請輸入名稱，例如：設定名稱 小明"
        );
        assert_eq!(Reply::Rendered("x".into()).to_string(), "x");
    }
}
