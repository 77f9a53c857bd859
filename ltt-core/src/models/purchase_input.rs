use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::CalculationError;
use crate::calculations::common::ensure_non_negative;
use crate::models::City;

/// The values a buyer enters before asking for an estimate.
///
/// The default is what a fresh form shows: a price of zero, the first city
/// in the list, and not a first-time buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseInput {
    /// Purchase price of the property. Must be non-negative.
    pub price: Decimal,
    pub city: City,
    pub is_first_time_buyer: bool,
}

impl PurchaseInput {
    /// Builds a validated input.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] when `price` is negative.
    pub fn new(
        price: Decimal,
        city: City,
        is_first_time_buyer: bool,
    ) -> Result<Self, CalculationError> {
        let input = Self {
            price,
            city,
            is_first_time_buyer,
        };
        input.validate()?;
        Ok(input)
    }

    /// Checks the price invariant.
    pub fn validate(&self) -> Result<(), CalculationError> {
        ensure_non_negative(self.price).map(|_| ())
    }
}
