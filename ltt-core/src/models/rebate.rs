use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::compute_rebate;

/// A first-time buyer rebate: the tax owed is reduced by at most `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebateRule {
    pub cap: Decimal,
}

impl RebateRule {
    pub fn new(cap: Decimal) -> Self {
        Self { cap }
    }

    /// Rebate available against `tax`; never more than the tax itself.
    pub fn apply(
        &self,
        tax: Decimal,
    ) -> Decimal {
        compute_rebate(tax, self.cap)
    }
}

/// Rebates actually credited on a purchase. Both are zero when the buyer
/// does not qualify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rebates {
    pub provincial: Decimal,
    pub municipal: Decimal,
}

impl Rebates {
    pub fn total(&self) -> Decimal {
        self.provincial + self.municipal
    }
}
