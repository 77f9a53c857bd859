//! Glue between the command line, the core session, and the file system.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ltt_core::render::{JsonRenderer, PlainTextRenderer};
use ltt_core::{DocumentArtifact, PurchaseInput, RendererRegistry, Session, SummaryReport};
use ltt_pdf::PdfRenderer;
use tracing::{error, info};

use crate::config::AppConfig;

/// Registers every document format the application can export.
pub fn build_registry(firm_name: &str) -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    registry.register(Box::new(PdfRenderer::new(firm_name)));
    registry.register(Box::new(PlainTextRenderer::new(firm_name)));
    registry.register(Box::new(JsonRenderer));
    registry
}

/// Formats a report for the terminal.
pub fn render_screen(report: &SummaryReport) -> String {
    let fields = report.display_fields();
    let width = fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Results:\n");
    for field in &fields {
        let label = format!("{}:", field.label);
        let pad = width + 1;
        out.push_str(&format!("  {label:<pad$}  {}\n", field.value));
    }
    out
}

/// Writes `artifact` into `directory` under its fixed file name.
///
/// The directory is created if missing. Returns the written path.
pub fn write_artifact(
    directory: &Path,
    artifact: &DocumentArtifact,
) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("cannot create export directory '{}'", directory.display()))?;
    let path = directory.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    info!(path = %path.display(), mime = artifact.mime_type, "document written");
    Ok(path)
}

/// Calculates one estimate and returns the screen text.
pub fn calculate(input: PurchaseInput) -> Result<String> {
    let mut session = Session::new();
    let report = session
        .submit_input(input)
        .context("cannot calculate estimate")?;
    Ok(render_screen(report))
}

/// Calculates one estimate and exports it.
///
/// The screen text is returned alongside the export outcome so callers can
/// show results even when the export fails.
pub fn calculate_and_export(
    input: PurchaseInput,
    config: &AppConfig,
    format: &str,
    directory: &Path,
) -> Result<(String, Result<PathBuf>)> {
    let mut session = Session::new();
    let screen = render_screen(
        session
            .submit_input(input)
            .context("cannot calculate estimate")?,
    );

    let registry = build_registry(&config.firm_name);
    let exported = export_session(&mut session, &registry, format, directory);

    Ok((screen, exported))
}

/// Renders the session's report in `format` and writes it to `directory`.
///
/// The session only counts as exported once the file is on disk.
pub fn export_session(
    session: &mut Session,
    registry: &RendererRegistry,
    format: &str,
    directory: &Path,
) -> Result<PathBuf> {
    let renderer = registry.get(format)?;
    session
        .export_to(renderer, |artifact| write_artifact(directory, &artifact))
        .inspect_err(|e| error!(error = %e, "export failed"))
}
