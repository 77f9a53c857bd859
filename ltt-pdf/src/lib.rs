//! PDF backend for exported estimate summaries.
//!
//! Produces a one-page A4 document listing the purchase details, the tax
//! owed after rebates, and the legal fee estimate. Register a
//! [`PdfRenderer`] with a [`ltt_core::RendererRegistry`] to make the `pdf`
//! format available.

pub mod writer;

use ltt_core::render::DEFAULT_FIRM_NAME;
use ltt_core::summary::DocumentLine;
use ltt_core::{DocumentRenderer, RenderError, SummaryReport};
use pdf_writer::Name;
use tracing::{debug, warn};

use writer::{
    BODY_FONT, DocumentInfo, PAGE_HEIGHT, PAGE_WIDTH, TITLE_FONT, TextRun, text_width,
    write_document,
};

pub const PDF_MIME_TYPE: &str = "application/pdf";

const MARGIN: f32 = 56.69;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 22.0;
const GAP_HEIGHT: f32 = 14.0;
const TITLE_LEADING: f32 = 20.0;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Renders [`SummaryReport`]s as PDF.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    firm_name: String,
}

impl PdfRenderer {
    pub fn new(firm_name: impl Into<String>) -> Self {
        Self {
            firm_name: firm_name.into(),
        }
    }

    /// Places each document line on the page, top to bottom.
    ///
    /// Lines wider than the text area wrap at spaces. Anything that would
    /// run past the bottom margin is left out.
    fn layout(
        &self,
        report: &SummaryReport,
    ) -> Vec<TextRun> {
        let mut y = PAGE_HEIGHT - MARGIN;
        let mut runs = Vec::new();
        let mut place = |font: Name<'static>, size: f32, y: f32, text: String| {
            if y < MARGIN {
                warn!(%text, "summary line does not fit on the page");
            } else {
                runs.push(TextRun {
                    font,
                    size,
                    x: MARGIN,
                    y,
                    text,
                });
            }
        };

        for line in report.document_lines(&self.firm_name) {
            match line {
                DocumentLine::Title(text) => {
                    for (i, part) in wrap(&text, TITLE_SIZE).into_iter().enumerate() {
                        y -= if i == 0 { TITLE_SIZE } else { TITLE_LEADING };
                        place(TITLE_FONT, TITLE_SIZE, y, part);
                    }
                    y -= LINE_HEIGHT - TITLE_SIZE;
                }
                DocumentLine::Text(text) => {
                    for part in wrap(&text, BODY_SIZE) {
                        y -= LINE_HEIGHT;
                        place(BODY_FONT, BODY_SIZE, y, part);
                    }
                }
                DocumentLine::Gap => y -= GAP_HEIGHT,
            }
        }

        runs
    }
}

/// Splits `text` into lines no wider than the text area at `size` points.
///
/// Breaks at spaces; a single word too long for a line is broken between
/// characters.
fn wrap(
    text: &str,
    size: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) <= TEXT_WIDTH {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if text_width(&current, size) > TEXT_WIDTH {
                current.pop();
                lines.push(std::mem::replace(&mut current, ch.to_string()));
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FIRM_NAME)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format_name(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }

    fn render(
        &self,
        report: &SummaryReport,
    ) -> Result<Vec<u8>, RenderError> {
        let runs = self.layout(report);
        let info = DocumentInfo {
            title: format!("{} - Cost Summary", self.firm_name),
            producer: concat!("ltt-pdf ", env!("CARGO_PKG_VERSION")).to_string(),
            created_at: report.generated_at,
        };

        let bytes = write_document(&runs, &info);
        debug!(lines = runs.len(), bytes = bytes.len(), "rendered pdf summary");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ltt_core::calculations::LandTransferTaxCalculator;
    use ltt_core::{City, LegalFeeEstimate, PurchaseInput, SummaryAssembler};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn report(city: City) -> SummaryReport {
        let input = PurchaseInput::new(dec!(600000), city, true).unwrap();
        let gross = LandTransferTaxCalculator::default()
            .calculate(&input)
            .unwrap();
        let fee = LegalFeeEstimate::for_price(input.price).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 5, 17, 14, 30, 0).unwrap();
        SummaryAssembler::default().assemble_at(&input, &gross, fee, at)
    }

    #[test]
    fn layout_puts_title_first_in_bold() {
        let runs = PdfRenderer::default().layout(&report(City::Toronto));

        assert_eq!(runs[0].font, TITLE_FONT);
        assert_eq!(runs[0].text, "Kalemi Law - Cost Summary");
    }

    #[test]
    fn layout_moves_down_the_page() {
        let runs = PdfRenderer::default().layout(&report(City::Toronto));

        assert!(runs.windows(2).all(|pair| pair[1].y < pair[0].y));
        assert!(runs.last().unwrap().y > MARGIN);
    }

    #[test]
    fn layout_includes_municipal_line_only_for_toronto() {
        let toronto = PdfRenderer::default().layout(&report(City::Toronto));
        let kingston = PdfRenderer::default().layout(&report(City::Kingston));

        assert_eq!(toronto.len(), 8);
        assert_eq!(kingston.len(), 7);
    }

    #[test]
    fn wrap_keeps_short_lines_whole() {
        assert_eq!(wrap("City: Toronto", BODY_SIZE), vec!["City: Toronto".to_string()]);
        assert_eq!(wrap("", BODY_SIZE), vec![String::new()]);
    }

    #[test]
    fn wrap_breaks_unspaced_text_between_characters() {
        let lines = wrap(&"W".repeat(200), BODY_SIZE);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "W".repeat(200));
        assert!(lines.iter().all(|l| text_width(l, BODY_SIZE) <= TEXT_WIDTH));
    }

    #[test]
    fn long_firm_name_wraps_inside_the_margins() {
        let firm = "Kalemi Barristers, Solicitors and Notaries Public Professional Corporation";
        let runs = PdfRenderer::new(firm).layout(&report(City::Toronto));
        let title: Vec<&TextRun> = runs.iter().filter(|r| r.font == TITLE_FONT).collect();

        assert!(title.len() > 1);
        assert_eq!(
            title.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" "),
            format!("{firm} - Cost Summary")
        );
        assert!(
            runs.iter()
                .all(|r| r.x + text_width(&r.text, r.size) <= PAGE_WIDTH - MARGIN)
        );
        assert!(runs.windows(2).all(|pair| pair[1].y < pair[0].y));
    }

    #[test]
    fn export_uses_fixed_name_and_mime_type() {
        let artifact = PdfRenderer::default()
            .export(&report(City::Toronto))
            .unwrap();

        assert_eq!(artifact.file_name, "kalemi_summary.pdf");
        assert_eq!(artifact.mime_type, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-"));
    }
}
