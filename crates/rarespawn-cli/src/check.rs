use std::fmt::Write as _;

use rarespawn_core::{load_format, load_names, AppConfig, FormatConfig, NameTable};
use rarespawn_pipeline::LabelStore;

/// Load every configured file and print what was found.
///
/// # Errors
///
/// Returns the first load or validation failure.
pub(crate) async fn run_check_config(config: &AppConfig) -> anyhow::Result<()> {
    let format = load_format(&config.format_path)?;
    let names = load_names(&config.names_path)?;
    let labels = LabelStore::open(&config.labels_path).await?;

    let summary = summarize(config, &format, &names, labels.len().await)?;
    print!("{summary}");
    Ok(())
}

pub(crate) fn summarize(
    config: &AppConfig,
    format: &FormatConfig,
    names: &NameTable,
    label_count: usize,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "environment:     {}", config.env)?;
    writeln!(out, "bind address:    {}", config.bind_addr)?;
    writeln!(out, "format file:     {}", config.format_path.display())?;
    writeln!(out, "  output_format: {:?}", format.template.source())?;
    writeln!(out, "  default_label: {}", format.default_label)?;
    writeln!(out, "  label command: {}", format.set_label_command)?;
    writeln!(
        out,
        "names file:      {} ({} entries)",
        config.names_path.display(),
        names.len()
    )?;
    writeln!(
        out,
        "labels file:     {} ({label_count} labels)",
        config.labels_path.display()
    )?;
    writeln!(
        out,
        "translation:     {} {} -> {} (timeout {} ms)",
        config.translate_base_url,
        config.source_lang,
        config.target_lang,
        config.translate_timeout_ms
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use rarespawn_core::Environment;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            env: Environment::Development,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            log_level: "info".to_string(),
            format_path: "config/format.yaml".into(),
            names_path: "config/pokemon_names.json".into(),
            labels_path: "data/labels.json".into(),
            translate_base_url: "https://translate.googleapis.com".to_string(),
            translate_timeout_ms: 3000,
            source_lang: "en".to_string(),
            target_lang: "zh-TW".to_string(),
        }
    }

    #[test]
    fn summary_lists_every_source() {
        let names: NameTable = [("Eevee".to_string(), "伊布".to_string())]
            .into_iter()
            .collect();
        let format = FormatConfig::new("{name_cn} {iv}", "路人");
        let text = summarize(&config(), &format, &names, 3).expect("summary");

        assert!(text.contains("environment:     development"));
        assert!(text.contains("bind address:    0.0.0.0:5000"));
        assert!(text.contains("\"{name_cn} {iv}\""));
        assert!(text.contains("default_label: 路人"));
        assert!(text.contains("label command: 設定名稱"));
        assert!(text.contains("(1 entries)"));
        assert!(text.contains("(3 labels)"));
        assert!(text.contains("en -> zh-TW (timeout 3000 ms)"));
    }

    #[tokio::test]
    async fn missing_format_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cfg = config();
        cfg.format_path = dir.path().join("absent.yaml");
        assert!(run_check_config(&cfg).await.is_err());
    }
}
