//! The seam between a finished [`SummaryReport`] and a downloadable document.
//!
//! The core never depends on a document-formatting library. Each output
//! format implements [`DocumentRenderer`] and is registered with a
//! [`RendererRegistry`] at startup; the PDF backend lives in its own crate.

mod json;
mod registry;
mod text;

use std::io;

use thiserror::Error;

use crate::models::SummaryReport;

pub use json::JsonRenderer;
pub use registry::RendererRegistry;
pub use text::PlainTextRenderer;

/// File name shared by every exported summary, before the extension.
pub const SUMMARY_FILE_STEM: &str = "kalemi_summary";

/// Firm name used in document titles when none is configured.
pub const DEFAULT_FIRM_NAME: &str = "Kalemi Law";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document output failed: {0}")]
    Io(#[from] io::Error),

    #[error("unknown document format '{requested}'; available: {available:?}")]
    UnknownFormat {
        requested: String,
        available: Vec<&'static str>,
    },

    #[error("cannot encode summary as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("renderer failed: {0}")]
    Backend(String),
}

/// A rendered document, ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One output format for exported summaries.
pub trait DocumentRenderer: Send + Sync {
    /// Unique, lowercase identifier for this format (e.g. `"pdf"`).
    fn format_name(&self) -> &'static str;

    /// MIME type offered alongside the download.
    fn mime_type(&self) -> &'static str;

    /// Fixed file name the document is offered under.
    fn file_name(&self) -> String {
        format!("{SUMMARY_FILE_STEM}.{}", self.format_name())
    }

    /// Renders `report` into an in-memory byte stream.
    fn render(
        &self,
        report: &SummaryReport,
    ) -> Result<Vec<u8>, RenderError>;

    /// Renders `report` and wraps the bytes with their file name and type.
    fn export(
        &self,
        report: &SummaryReport,
    ) -> Result<DocumentArtifact, RenderError> {
        Ok(DocumentArtifact {
            file_name: self.file_name(),
            mime_type: self.mime_type(),
            bytes: self.render(report)?,
        })
    }
}
