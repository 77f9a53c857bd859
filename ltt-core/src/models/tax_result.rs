use rust_decimal::Decimal;
use serde::Serialize;

/// Land transfer tax owed on one purchase.
///
/// The total is always the sum of the two lines; the only way to build a
/// result is through [`TaxResult::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    provincial_tax: Decimal,
    municipal_tax: Decimal,
    total_tax: Decimal,
}

impl TaxResult {
    pub fn new(
        provincial_tax: Decimal,
        municipal_tax: Decimal,
    ) -> Self {
        Self {
            provincial_tax,
            municipal_tax,
            total_tax: provincial_tax + municipal_tax,
        }
    }

    pub fn provincial_tax(&self) -> Decimal {
        self.provincial_tax
    }

    /// Zero unless the purchase city levies a municipal tax.
    pub fn municipal_tax(&self) -> Decimal {
        self.municipal_tax
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }
}
