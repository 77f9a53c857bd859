//! Legal fee estimate.
//!
//! A flat base fee, plus one surcharge unit once the price passes
//! $2,000,000 and one more for every further full $1,000,000. Units are
//! counted with floor division, so $2,999,999.99 is still one unit and
//! $3,000,000 is two.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::CalculationError;
use super::common::ensure_non_negative;
use crate::models::LegalFeeEstimate;

pub const LEGAL_BASE_FEE: Decimal = dec!(1500);
pub const SURCHARGE_PER_UNIT: Decimal = dec!(500);
pub const SURCHARGE_THRESHOLD: Decimal = dec!(2000000);
pub const SURCHARGE_STEP: Decimal = dec!(1000000);
pub const DISBURSEMENTS_LOW: Decimal = dec!(300);
pub const DISBURSEMENTS_HIGH: Decimal = dec!(500);

/// Legal fee (before HST) for a purchase at `price`.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] if `price` is negative.
pub fn compute_legal_fee(price: Decimal) -> Result<Decimal, CalculationError> {
    let price = ensure_non_negative(price)?;
    Ok(LEGAL_BASE_FEE + SURCHARGE_PER_UNIT * surcharge_units(price))
}

fn surcharge_units(price: Decimal) -> Decimal {
    if price <= SURCHARGE_THRESHOLD {
        return Decimal::ZERO;
    }
    ((price - SURCHARGE_THRESHOLD) / SURCHARGE_STEP).floor() + Decimal::ONE
}

impl LegalFeeEstimate {
    /// Full legal cost estimate for a purchase at `price`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] if `price` is negative.
    pub fn for_price(price: Decimal) -> Result<Self, CalculationError> {
        let price = ensure_non_negative(price)?;
        let surcharge_units = surcharge_units(price);

        Ok(Self {
            base_fee: LEGAL_BASE_FEE,
            per_extra_million_surcharge: SURCHARGE_PER_UNIT,
            surcharge_units,
            fee: LEGAL_BASE_FEE + SURCHARGE_PER_UNIT * surcharge_units,
            disbursement_range: (DISBURSEMENTS_LOW, DISBURSEMENTS_HIGH),
        })
    }
}
