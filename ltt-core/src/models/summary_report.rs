use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{LegalFeeEstimate, PurchaseInput, Rebates, TaxResult};

/// Snapshot of one completed calculation.
///
/// Built by the summary assembler and only ever read afterwards: the screen
/// and every document renderer consume the same report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub input: PurchaseInput,
    /// Tax before rebates, with the municipal line zeroed for cities that
    /// do not levy it.
    pub gross: TaxResult,
    pub rebates: Rebates,
    /// Tax owed after rebates.
    pub taxes: TaxResult,
    pub legal_fee: LegalFeeEstimate,
    pub generated_at: DateTime<Utc>,
}
