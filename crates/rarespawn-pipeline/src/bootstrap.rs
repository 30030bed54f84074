//! Startup wiring shared by the server and the CLI.

use std::sync::Arc;
use std::time::Duration;

use rarespawn_core::{load_format, load_names, AppConfig};

use crate::dispatch::Pipeline;
use crate::error::{PipelineError, TranslateError};
use crate::labels::LabelStore;
use crate::resolve::{Resolver, TranslateSettings};
use crate::translate::{GoogleTranslator, Translator};

#[must_use]
pub fn translate_settings(config: &AppConfig) -> TranslateSettings {
    TranslateSettings {
        source_lang: config.source_lang.clone(),
        target_lang: config.target_lang.clone(),
        timeout: Duration::from_millis(config.translate_timeout_ms),
    }
}

/// # Errors
///
/// Returns [`TranslateError`] if the HTTP client cannot be built or the
/// configured base URL is invalid.
pub fn google_translator(config: &AppConfig) -> Result<GoogleTranslator, TranslateError> {
    GoogleTranslator::with_base_url(
        &config.translate_base_url,
        Duration::from_millis(config.translate_timeout_ms),
    )
}

/// Load the format, name table, and label store named by `config`.
///
/// # Errors
///
/// Returns [`PipelineError`] if any of the three cannot be loaded.
pub async fn build_pipeline(
    config: &AppConfig,
    translator: Arc<dyn Translator>,
) -> Result<Pipeline, PipelineError> {
    let format = load_format(&config.format_path)?;
    let names = Arc::new(load_names(&config.names_path)?);
    let labels = Arc::new(LabelStore::open(&config.labels_path).await?);

    tracing::info!(
        names = names.len(),
        default_label = %format.default_label,
        target_lang = %config.target_lang,
        "pipeline configured"
    );

    let resolver = Resolver::new(names, translator, translate_settings(config));
    Ok(Pipeline::new(format, resolver, labels).with_format_path(&config.format_path))
}
