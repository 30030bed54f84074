use std::sync::Arc;

use rarespawn_core::AppConfig;
use rarespawn_pipeline::{build_pipeline, google_translator, PassthroughTranslator, Translator};
use tokio::io::AsyncReadExt;

/// Run one message through the pipeline and print the reply.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, the translator cannot be
/// built, or the pipeline configuration fails to load.
pub(crate) async fn run_format(
    config: &AppConfig,
    identity: &str,
    words: &[String],
    no_translate: bool,
) -> anyhow::Result<()> {
    let text = match join_words(words) {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let translator: Arc<dyn Translator> = if no_translate {
        Arc::new(PassthroughTranslator)
    } else {
        Arc::new(google_translator(config)?)
    };

    let pipeline = build_pipeline(config, translator).await?;
    println!("{}", pipeline.handle(identity, &text).await);
    Ok(())
}

/// Positional words joined back into one message; `None` means read stdin.
pub(crate) fn join_words(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
