//! Turns calculator output into the report shown on screen and exported.
//!
//! The assembler does no tax arithmetic of its own beyond subtracting
//! first-time buyer rebates and dropping the municipal line for cities
//! that do not levy it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{format_currency, format_whole_dollars};
use crate::calculations::{ontario, toronto};
use crate::models::{LegalFeeEstimate, PurchaseInput, RebateRule, Rebates, SummaryReport, TaxResult};

/// Assembles a report using the Ontario and Toronto rebate caps, stamped
/// with the current time.
pub fn assemble(
    input: &PurchaseInput,
    tax_result: &TaxResult,
    legal_fee: LegalFeeEstimate,
) -> SummaryReport {
    SummaryAssembler::default().assemble(input, tax_result, legal_fee)
}

/// Applies rebates and builds [`SummaryReport`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryAssembler {
    provincial_rebate: RebateRule,
    municipal_rebate: RebateRule,
}

impl SummaryAssembler {
    pub fn new(
        provincial_rebate: RebateRule,
        municipal_rebate: RebateRule,
    ) -> Self {
        Self {
            provincial_rebate,
            municipal_rebate,
        }
    }

    /// Builds a report stamped with the current time.
    pub fn assemble(
        &self,
        input: &PurchaseInput,
        tax_result: &TaxResult,
        legal_fee: LegalFeeEstimate,
    ) -> SummaryReport {
        self.assemble_at(input, tax_result, legal_fee, Utc::now())
    }

    /// Builds a report with an explicit generation time.
    ///
    /// `tax_result` is the gross result from the calculator. The report
    /// carries both the gross and the post-rebate amounts.
    pub fn assemble_at(
        &self,
        input: &PurchaseInput,
        tax_result: &TaxResult,
        legal_fee: LegalFeeEstimate,
        generated_at: DateTime<Utc>,
    ) -> SummaryReport {
        let municipal_gross = if input.city.levies_municipal_tax() {
            tax_result.municipal_tax()
        } else {
            Decimal::ZERO
        };
        let gross = TaxResult::new(tax_result.provincial_tax(), municipal_gross);

        let rebates = if input.is_first_time_buyer {
            Rebates {
                provincial: self.provincial_rebate.apply(gross.provincial_tax()),
                municipal: self.municipal_rebate.apply(gross.municipal_tax()),
            }
        } else {
            Rebates::default()
        };

        let taxes = TaxResult::new(
            gross.provincial_tax() - rebates.provincial,
            gross.municipal_tax() - rebates.municipal,
        );

        debug!(
            total = %taxes.total_tax(),
            rebates = %rebates.total(),
            fee = %legal_fee.fee,
            "assembled summary report"
        );

        SummaryReport {
            input: input.clone(),
            gross,
            rebates,
            taxes,
            legal_fee,
            generated_at,
        }
    }
}

impl Default for SummaryAssembler {
    fn default() -> Self {
        Self::new(ontario().rebate(), toronto().rebate())
    }
}

/// One labelled value on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub label: String,
    pub value: String,
}

impl DisplayField {
    fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One line of the exported one-page summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLine {
    Title(String),
    Text(String),
    /// Vertical space between groups of lines.
    Gap,
}

impl SummaryReport {
    /// Whether the municipal line belongs on screen and in documents.
    pub fn shows_municipal_tax(&self) -> bool {
        self.input.city.levies_municipal_tax()
    }

    /// Legal fee with the HST note, e.g. `$1,500.00 + HST`.
    pub fn legal_fee_text(&self) -> String {
        format!("{} + HST", format_currency(self.legal_fee.fee))
    }

    /// Disbursement range; `separator` sits between the two ends.
    pub fn disbursement_text(
        &self,
        separator: &str,
    ) -> String {
        let (low, high) = self.legal_fee.disbursement_range;
        format!(
            "{}{separator}{}",
            format_whole_dollars(low),
            format_whole_dollars(high)
        )
    }

    /// Fields for the results screen, in display order.
    pub fn display_fields(&self) -> Vec<DisplayField> {
        let mut fields = vec![DisplayField::new(
            "Provincial (Ontario) Land Transfer Tax",
            format_currency(self.taxes.provincial_tax()),
        )];
        if self.shows_municipal_tax() {
            fields.push(DisplayField::new(
                format!("Municipal ({}) Land Transfer Tax", self.input.city),
                format_currency(self.taxes.municipal_tax()),
            ));
        }
        fields.push(DisplayField::new("Legal Fees", self.legal_fee_text()));
        fields.push(DisplayField::new(
            "Estimated Disbursements",
            self.disbursement_text("\u{2013}"),
        ));
        fields.push(DisplayField::new(
            "Total Estimated Land Transfer Taxes",
            format_currency(self.taxes.total_tax()),
        ));
        fields
    }

    /// Lines of the exported summary, titled with `firm_name`.
    pub fn document_lines(
        &self,
        firm_name: &str,
    ) -> Vec<DocumentLine> {
        let buyer = if self.input.is_first_time_buyer {
            "Yes"
        } else {
            "No"
        };

        let mut lines = vec![
            DocumentLine::Title(format!("{firm_name} - Cost Summary")),
            DocumentLine::Gap,
            DocumentLine::Text(format!(
                "Purchase Price: {}",
                format_currency(self.input.price)
            )),
            DocumentLine::Text(format!("City: {}", self.input.city)),
            DocumentLine::Text(format!("First-Time Buyer: {buyer}")),
            DocumentLine::Gap,
            DocumentLine::Text(format!(
                "Provincial (Ontario) LTT: {}",
                format_currency(self.taxes.provincial_tax())
            )),
        ];
        if self.shows_municipal_tax() {
            lines.push(DocumentLine::Text(format!(
                "Municipal ({}) LTT: {}",
                self.input.city,
                format_currency(self.taxes.municipal_tax())
            )));
        }
        lines.push(DocumentLine::Text(format!(
            "Legal Fees: {}",
            self.legal_fee_text()
        )));
        lines.push(DocumentLine::Text(format!(
            "Disbursements Estimate: {}",
            self.disbursement_text("-")
        )));
        lines
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::LandTransferTaxCalculator;
    use crate::models::City;

    fn report_for(
        price: Decimal,
        city: City,
        first_time: bool,
    ) -> SummaryReport {
        let input = PurchaseInput::new(price, city, first_time).unwrap();
        let gross = LandTransferTaxCalculator::default()
            .calculate(&input)
            .unwrap();
        let fee = LegalFeeEstimate::for_price(price).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        SummaryAssembler::default().assemble_at(&input, &gross, fee, at)
    }

    // =========================================================================
    // assemble tests
    // =========================================================================

    #[test]
    fn assemble_without_rebate_keeps_gross_amounts() {
        let report = report_for(dec!(300000), City::Ottawa, false);

        assert_eq!(report.taxes, report.gross);
        assert_eq!(report.rebates, Rebates::default());
        assert_eq!(report.taxes.total_tax(), dec!(2975.00));
    }

    #[test]
    fn assemble_applies_both_rebates_in_toronto() {
        let report = report_for(dec!(600000), City::Toronto, true);

        assert_eq!(report.rebates.provincial, dec!(4000));
        assert_eq!(report.rebates.municipal, dec!(4475));
        assert_eq!(report.taxes.provincial_tax(), dec!(4475.00));
        assert_eq!(report.taxes.municipal_tax(), dec!(4000.00));
        assert_eq!(report.taxes.total_tax(), dec!(8475.00));
    }

    #[test]
    fn assemble_rebate_wipes_out_small_tax() {
        let report = report_for(dec!(300000), City::Toronto, true);

        assert_eq!(report.taxes.provincial_tax(), dec!(0));
        assert_eq!(report.taxes.municipal_tax(), dec!(0));
    }

    #[test]
    fn assemble_zeroes_municipal_line_for_non_levying_city() {
        let input = PurchaseInput::new(dec!(600000), City::Hamilton, true).unwrap();
        // A stray municipal amount must not leak into the report.
        let gross = TaxResult::new(dec!(8475.00), dec!(8475.00));
        let fee = LegalFeeEstimate::for_price(input.price).unwrap();

        let report = assemble(&input, &gross, fee);

        assert_eq!(report.gross.municipal_tax(), dec!(0));
        assert_eq!(report.rebates.municipal, dec!(0));
        assert_eq!(report.taxes.total_tax(), dec!(4475.00));
    }

    #[test]
    fn assemble_keeps_the_timestamp() {
        let report = report_for(dec!(1), City::Ajax, false);

        assert_eq!(
            report.generated_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
        );
    }

    // =========================================================================
    // display_fields tests
    // =========================================================================

    #[test]
    fn display_fields_for_toronto_include_municipal_line() {
        let report = report_for(dec!(600000), City::Toronto, true);

        let fields = report.display_fields();

        assert_eq!(
            fields,
            vec![
                DisplayField::new("Provincial (Ontario) Land Transfer Tax", "$4,475.00"),
                DisplayField::new("Municipal (Toronto) Land Transfer Tax", "$4,000.00"),
                DisplayField::new("Legal Fees", "$1,500.00 + HST"),
                DisplayField::new("Estimated Disbursements", "$300\u{2013}$500"),
                DisplayField::new("Total Estimated Land Transfer Taxes", "$8,475.00"),
            ]
        );
    }

    #[test]
    fn display_fields_elsewhere_omit_municipal_line() {
        let report = report_for(dec!(300000), City::Ottawa, false);

        let labels: Vec<String> = report
            .display_fields()
            .into_iter()
            .map(|f| f.label)
            .collect();

        assert!(!labels.iter().any(|l| l.starts_with("Municipal")));
        assert_eq!(labels.len(), 4);
    }

    // =========================================================================
    // document_lines tests
    // =========================================================================

    #[test]
    fn document_lines_for_toronto_buyer() {
        let report = report_for(dec!(600000), City::Toronto, true);

        let lines = report.document_lines("Kalemi Law");

        assert_eq!(
            lines,
            vec![
                DocumentLine::Title("Kalemi Law - Cost Summary".to_string()),
                DocumentLine::Gap,
                DocumentLine::Text("Purchase Price: $600,000.00".to_string()),
                DocumentLine::Text("City: Toronto".to_string()),
                DocumentLine::Text("First-Time Buyer: Yes".to_string()),
                DocumentLine::Gap,
                DocumentLine::Text("Provincial (Ontario) LTT: $4,475.00".to_string()),
                DocumentLine::Text("Municipal (Toronto) LTT: $4,000.00".to_string()),
                DocumentLine::Text("Legal Fees: $1,500.00 + HST".to_string()),
                DocumentLine::Text("Disbursements Estimate: $300-$500".to_string()),
            ]
        );
    }

    #[test]
    fn document_lines_for_barrie_show_surcharged_fee() {
        let report = report_for(dec!(3500000), City::Barrie, false);

        let lines = report.document_lines("Kalemi Law");

        assert!(lines.contains(&DocumentLine::Text("First-Time Buyer: No".to_string())));
        assert!(lines.contains(&DocumentLine::Text(
            "Legal Fees: $2,500.00 + HST".to_string()
        )));
        assert!(
            !lines
                .iter()
                .any(|l| matches!(l, DocumentLine::Text(t) if t.starts_with("Municipal")))
        );
    }
}
