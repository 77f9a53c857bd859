//! Land transfer tax, rebate, and legal fee calculations.
//!
//! Every function here is pure and total over non-negative prices. A
//! negative price is rejected with [`CalculationError::InvalidInput`]
//! before any arithmetic happens.

pub mod common;
pub mod jurisdiction;
pub mod land_transfer;
pub mod legal_fee;

pub use jurisdiction::{Jurisdiction, ontario, toronto};
pub use land_transfer::{
    CalculationError, LandTransferTaxCalculator, compute_municipal_tax, compute_provincial_tax,
    compute_rebate,
};
pub use legal_fee::compute_legal_fee;
