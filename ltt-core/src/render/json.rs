use super::{DocumentRenderer, RenderError};
use crate::models::SummaryReport;

/// Renders the whole report as pretty-printed JSON.
///
/// Amounts are written as decimal strings so no precision is lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn render(
        &self,
        report: &SummaryReport,
    ) -> Result<Vec<u8>, RenderError> {
        let mut bytes = serde_json::to_vec_pretty(report)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
