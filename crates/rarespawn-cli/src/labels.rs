//! `labels` subcommand handlers. Output goes to the supplied writer.

use std::io::Write;

use rarespawn_pipeline::LabelStore;

pub(crate) async fn print_label(
    store: &LabelStore,
    identity: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match store.get(identity).await {
        Some(label) => writeln!(out, "{label}")?,
        None => writeln!(out, "no label set for '{identity}'")?,
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the label is blank or the label file cannot be written.
pub(crate) async fn set_label(
    store: &LabelStore,
    identity: &str,
    label: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let label = label.trim();
    if label.is_empty() {
        anyhow::bail!("label must not be empty");
    }
    store.set(identity, label).await?;
    tracing::info!(identity, label, "label updated from cli");
    writeln!(out, "{identity} -> {label}")?;
    Ok(())
}

pub(crate) async fn print_all(store: &LabelStore, out: &mut impl Write) -> anyhow::Result<()> {
    let entries = store.entries().await;
    if entries.is_empty() {
        writeln!(out, "no labels stored")?;
    }
    for (identity, label) in entries {
        writeln!(out, "{identity}\t{label}")?;
    }
    Ok(())
}
