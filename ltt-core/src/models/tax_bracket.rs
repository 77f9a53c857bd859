use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building a [`BracketSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// No brackets were provided.
    #[error("bracket schedule is empty")]
    Empty,

    /// An upper bound is not strictly greater than the one before it
    /// (or is not positive, for the first bracket).
    #[error("bracket {index} upper bound {bound} does not increase on the previous bracket")]
    NonIncreasingBound { index: usize, bound: Decimal },

    /// The last bracket has an upper bound, leaving prices above it uncovered.
    #[error("top bracket must be unbounded")]
    BoundedTopBracket,

    /// An unbounded bracket appears before the end of the schedule.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedInnerBracket(usize),

    /// A marginal rate lies outside `[0, 1]`.
    #[error("bracket {index} rate {rate} must be between 0 and 1")]
    InvalidRate { index: usize, rate: Decimal },
}

/// One tier of a marginal rate schedule.
///
/// The bracket covers the portion of the price between the previous
/// bracket's upper bound (or zero) and its own inclusive `upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Inclusive upper bound; `None` for the open-ended top bracket.
    pub upper_bound: Option<Decimal>,
    /// Rate applied to the portion of the price inside this bracket.
    pub marginal_rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        marginal_rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            marginal_rate,
        }
    }

    pub fn unbounded(marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            marginal_rate,
        }
    }
}

/// An ordered, gap-free set of brackets covering `[0, ∞)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and wraps a list of brackets.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the list is empty, bounds do not strictly
    /// increase, the top bracket is bounded, an inner bracket is unbounded,
    /// or a rate is outside `[0, 1]`.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        if brackets.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: bracket.marginal_rate,
                });
            }
            match bracket.upper_bound {
                Some(bound) if bound <= previous => {
                    return Err(ScheduleError::NonIncreasingBound { index, bound });
                }
                Some(_) if index == last => return Err(ScheduleError::BoundedTopBracket),
                Some(bound) => previous = bound,
                None if index != last => return Err(ScheduleError::UnboundedInnerBracket(index)),
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Wraps a hardcoded table without returning an error.
    pub(crate) fn from_known_good(brackets: Vec<TaxBracket>) -> Self {
        debug_assert_eq!(Self::new(brackets.clone()).err(), None);
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Sums the marginal tax owed on `amount`, unrounded.
    ///
    /// Each bracket taxes only the slice of `amount` that falls inside it,
    /// so the result is continuous across bracket edges. Amounts at or
    /// below zero owe nothing.
    pub fn tax_on(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let mut lower = Decimal::ZERO;
        let mut tax = Decimal::ZERO;

        for bracket in &self.brackets {
            if amount <= lower {
                break;
            }
            let top = bracket.upper_bound.map_or(amount, |bound| amount.min(bound));
            tax += (top - lower) * bracket.marginal_rate;

            match bracket.upper_bound {
                Some(bound) => lower = bound,
                None => break,
            }
        }

        tax
    }
}
