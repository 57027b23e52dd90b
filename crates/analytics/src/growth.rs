//! Cumulative value curves for the five portfolios.
//!
//! Long portfolios compound: every day the value is multiplied by `1 + r`.
//! The spread portfolios do not compound. Their value is a linear function of
//! the running sum of daily spread returns, scaled by the leverage factor and
//! floored at zero:
//!
//! ```text
//! value[t] = max(0, initial * (1 + leverage * sum(r[0..=t])))
//! ```
//!
//! The floor is re-evaluated every day from the running sum, so a spread
//! portfolio that touches zero comes back as soon as the sum recovers.
//!
//! Cells are `None` when the arithmetic leaves the representable range. A
//! `None` is never treated as zero.

use crate::portfolio::{PortfolioReturns, PortfolioTable};
use core_types::AccountingModel;
use rust_decimal::Decimal;

/// Value of every portfolio in currency units, one row per trading day.
pub type CumulativeGrowth = PortfolioTable<Option<Decimal>>;

/// Converts portfolio returns into value curves.
#[derive(Debug, Clone, Copy)]
pub struct GrowthEngine {
    initial_investment: Decimal,
    leverage: Decimal,
}

impl GrowthEngine {
    pub fn new(initial_investment: Decimal, leverage: Decimal) -> Self {
        Self {
            initial_investment,
            leverage,
        }
    }

    pub fn initial_investment(&self) -> Decimal {
        self.initial_investment
    }

    /// Applies each portfolio's accounting model to its return column.
    pub fn cumulative_growth(&self, returns: &PortfolioReturns) -> CumulativeGrowth {
        returns.map_columns(|id, column| match id.accounting_model() {
            AccountingModel::Compounding => compounded_values(column, self.initial_investment),
            AccountingModel::LeveragedSpread => {
                leveraged_spread_values(column, self.initial_investment, self.leverage)
            }
        })
    }
}

/// `initial * prod(1 + r)` evaluated day by day.
pub fn compounded_values(returns: &[Decimal], initial: Decimal) -> Vec<Option<Decimal>> {
    let mut value = Some(initial);
    returns
        .iter()
        .map(|r| {
            value = value.and_then(|v| v.checked_mul(Decimal::ONE.checked_add(*r)?));
            value
        })
        .collect()
}

/// `max(0, initial * (1 + leverage * running_sum))` evaluated day by day.
pub fn leveraged_spread_values(
    returns: &[Decimal],
    initial: Decimal,
    leverage: Decimal,
) -> Vec<Option<Decimal>> {
    let mut running_sum = Some(Decimal::ZERO);
    returns
        .iter()
        .map(|r| {
            running_sum = running_sum.and_then(|s| s.checked_add(*r));
            let levered = leverage.checked_mul(running_sum?)?;
            let value = initial.checked_mul(Decimal::ONE.checked_add(levered)?)?;
            Some(value.max(Decimal::ZERO))
        })
        .collect()
}
