//! Provincial and municipal land transfer tax.
//!
//! # Ontario schedule
//!
//! | Portion of price          | Marginal rate |
//! |---------------------------|---------------|
//! | up to $55,000             | 0.5%          |
//! | $55,000.01 to $250,000    | 1.0%          |
//! | $250,000.01 to $400,000   | 1.5%          |
//! | $400,000.01 to $2,000,000 | 2.0%          |
//! | above $2,000,000          | 2.5%          |
//!
//! Toronto levies a municipal tax on the same schedule. Every other
//! supported city levies none.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ltt_core::calculations::LandTransferTaxCalculator;
//! use ltt_core::{City, PurchaseInput};
//!
//! let input = PurchaseInput::new(dec!(600000), City::Toronto, true).unwrap();
//! let result = LandTransferTaxCalculator::default().calculate(&input).unwrap();
//!
//! assert_eq!(result.provincial_tax(), dec!(8475.00));
//! assert_eq!(result.municipal_tax(), dec!(8475.00));
//! assert_eq!(result.total_tax(), dec!(16950.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::common::ensure_non_negative;
use super::jurisdiction::{Jurisdiction, ontario, toronto};
use crate::models::{City, PurchaseInput, TaxResult};

/// Errors that can occur during land transfer tax calculations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The purchase price is negative.
    #[error("purchase price must not be negative, got {0}")]
    InvalidInput(Decimal),
}

/// Ontario land transfer tax on `price`, before any rebate.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] if `price` is negative.
pub fn compute_provincial_tax(price: Decimal) -> Result<Decimal, CalculationError> {
    let price = ensure_non_negative(price)?;
    Ok(ontario().tax_on(price))
}

/// Municipal land transfer tax on `price` in `city`, before any rebate.
///
/// Zero for every city that does not levy the tax.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] if `price` is negative.
pub fn compute_municipal_tax(
    price: Decimal,
    city: City,
) -> Result<Decimal, CalculationError> {
    let price = ensure_non_negative(price)?;
    if !city.levies_municipal_tax() {
        return Ok(Decimal::ZERO);
    }
    Ok(toronto().tax_on(price))
}

/// First-time buyer rebate: the tax owed, capped at `cap`.
pub fn compute_rebate(
    tax: Decimal,
    cap: Decimal,
) -> Decimal {
    tax.min(cap)
}

/// Computes gross (pre-rebate) land transfer tax for a purchase.
///
/// Holds the provincial and municipal jurisdictions so alternative
/// schedules can be swapped in; [`Default`] uses Ontario and Toronto.
#[derive(Debug, Clone, Copy)]
pub struct LandTransferTaxCalculator<'a> {
    provincial: &'a Jurisdiction,
    municipal: &'a Jurisdiction,
}

impl<'a> LandTransferTaxCalculator<'a> {
    pub fn new(
        provincial: &'a Jurisdiction,
        municipal: &'a Jurisdiction,
    ) -> Self {
        Self {
            provincial,
            municipal,
        }
    }

    pub fn provincial(&self) -> &'a Jurisdiction {
        self.provincial
    }

    pub fn municipal(&self) -> &'a Jurisdiction {
        self.municipal
    }

    /// Calculates provincial and municipal tax owed on `input`.
    ///
    /// The municipal line is zero unless the city levies it. Rebates are
    /// not applied here; see [`crate::summary::SummaryAssembler`].
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] if the price is negative.
    pub fn calculate(
        &self,
        input: &PurchaseInput,
    ) -> Result<TaxResult, CalculationError> {
        input.validate()?;

        let provincial = self.provincial.tax_on(input.price);
        let municipal = if input.city.levies_municipal_tax() {
            self.municipal.tax_on(input.price)
        } else {
            Decimal::ZERO
        };

        debug!(
            price = %input.price,
            city = %input.city,
            %provincial,
            %municipal,
            "calculated gross land transfer tax"
        );

        Ok(TaxResult::new(provincial, municipal))
    }
}

impl Default for LandTransferTaxCalculator<'static> {
    fn default() -> Self {
        Self::new(ontario(), toronto())
    }
}
