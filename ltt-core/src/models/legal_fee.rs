use rust_decimal::Decimal;
use serde::Serialize;

/// Estimated legal cost of closing a purchase.
///
/// Fees are quoted before HST. Disbursements are a range, not itemized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalFeeEstimate {
    pub base_fee: Decimal,
    /// Charged once per surcharge unit above the threshold.
    pub per_extra_million_surcharge: Decimal,
    pub surcharge_units: Decimal,
    /// `base_fee + per_extra_million_surcharge * surcharge_units`.
    pub fee: Decimal,
    /// Low and high ends of the disbursement estimate.
    pub disbursement_range: (Decimal, Decimal),
}
