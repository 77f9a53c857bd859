mod city;
mod legal_fee;
mod purchase_input;
mod rebate;
mod summary_report;
mod tax_bracket;
mod tax_result;

pub use city::{City, UnknownCityError};
pub use legal_fee::LegalFeeEstimate;
pub use purchase_input::PurchaseInput;
pub use rebate::{RebateRule, Rebates};
pub use summary_report::SummaryReport;
pub use tax_bracket::{BracketSchedule, ScheduleError, TaxBracket};
pub use tax_result::TaxResult;
