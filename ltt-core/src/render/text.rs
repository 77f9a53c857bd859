use std::io::Write;

use super::{DEFAULT_FIRM_NAME, DocumentRenderer, RenderError};
use crate::models::SummaryReport;
use crate::summary::DocumentLine;

/// Renders the summary as UTF-8 plain text.
#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    firm_name: String,
}

impl PlainTextRenderer {
    pub fn new(firm_name: impl Into<String>) -> Self {
        Self {
            firm_name: firm_name.into(),
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FIRM_NAME)
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn format_name(&self) -> &'static str {
        "txt"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(
        &self,
        report: &SummaryReport,
    ) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::new();
        for line in report.document_lines(&self.firm_name) {
            match line {
                DocumentLine::Title(title) => {
                    writeln!(out, "{title}")?;
                    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
                }
                DocumentLine::Text(text) => writeln!(out, "{text}")?,
                DocumentLine::Gap => writeln!(out)?,
            }
        }
        writeln!(
            out,
            "\nGenerated {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::LandTransferTaxCalculator;
    use crate::models::{City, LegalFeeEstimate, PurchaseInput};
    use crate::summary::SummaryAssembler;

    fn ottawa_report() -> SummaryReport {
        let input = PurchaseInput::new(dec!(300000), City::Ottawa, false).unwrap();
        let gross = LandTransferTaxCalculator::default()
            .calculate(&input)
            .unwrap();
        let fee = LegalFeeEstimate::for_price(input.price).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 30, 9, 15, 0).unwrap();
        SummaryAssembler::default().assemble_at(&input, &gross, fee, at)
    }

    #[test]
    fn render_writes_every_document_line() {
        let bytes = PlainTextRenderer::default()
            .render(&ottawa_report())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "Kalemi Law - Cost Summary\n\
             =========================\n\
             \n\
             Purchase Price: $300,000.00\n\
             City: Ottawa\n\
             First-Time Buyer: No\n\
             \n\
             Provincial (Ontario) LTT: $2,975.00\n\
             Legal Fees: $1,500.00 + HST\n\
             Disbursements Estimate: $300-$500\n\
             \n\
             Generated 2025-06-30 09:15 UTC\n"
        );
    }

    #[test]
    fn export_uses_fixed_file_name() {
        let artifact = PlainTextRenderer::new("Acme Legal")
            .export(&ottawa_report())
            .unwrap();

        assert_eq!(artifact.file_name, "kalemi_summary.txt");
        assert_eq!(artifact.mime_type, "text/plain; charset=utf-8");
        assert!(artifact.bytes.starts_with(b"Acme Legal - Cost Summary\n"));
    }
}
