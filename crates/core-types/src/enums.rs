use serde::{Deserialize, Serialize};
use std::fmt;

/// The three tradeable instruments every portfolio is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetId {
    Qqq,
    Spy,
    Iwm,
}

impl AssetId {
    /// All assets in their canonical order.
    pub const ALL: [AssetId; 3] = [AssetId::Qqq, AssetId::Spy, AssetId::Iwm];

    /// Returns the ticker symbol of the asset.
    pub fn ticker(&self) -> &'static str {
        match self {
            AssetId::Qqq => "QQQ",
            AssetId::Spy => "SPY",
            AssetId::Iwm => "IWM",
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// How a portfolio's daily returns turn into a value curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountingModel {
    /// Geometric compounding of a long position: `initial * prod(1 + r)`.
    Compounding,
    /// Leverage applied to the running (un-compounded) sum of spread returns,
    /// floored at zero: `max(0, initial * (1 + leverage * sum(r)))`.
    LeveragedSpread,
}

/// The five synthetic portfolios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortfolioId {
    /// QQQ minus IWM spread.
    P1,
    /// SPY minus IWM spread.
    P2,
    /// Long QQQ.
    P3,
    /// Long SPY.
    P4,
    /// Long IWM.
    P5,
}

impl PortfolioId {
    /// All portfolios in reporting order. Every emitter iterates in this order.
    pub const ALL: [PortfolioId; 5] = [
        PortfolioId::P1,
        PortfolioId::P2,
        PortfolioId::P3,
        PortfolioId::P4,
        PortfolioId::P5,
    ];

    /// The column name used in reports and charts.
    pub fn name(&self) -> &'static str {
        match self {
            PortfolioId::P1 => "P1_QQQ_vs_IWM",
            PortfolioId::P2 => "P2_SPY_vs_IWM",
            PortfolioId::P3 => "P3_Long_QQQ",
            PortfolioId::P4 => "P4_Long_SPY",
            PortfolioId::P5 => "P5_Long_IWM",
        }
    }

    pub fn accounting_model(&self) -> AccountingModel {
        match self {
            PortfolioId::P1 | PortfolioId::P2 => AccountingModel::LeveragedSpread,
            PortfolioId::P3 | PortfolioId::P4 | PortfolioId::P5 => AccountingModel::Compounding,
        }
    }

    /// Zero-based position in [`PortfolioId::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_portfolios_use_leveraged_model() {
        assert_eq!(PortfolioId::P1.accounting_model(), AccountingModel::LeveragedSpread);
        assert_eq!(PortfolioId::P2.accounting_model(), AccountingModel::LeveragedSpread);
        for id in [PortfolioId::P3, PortfolioId::P4, PortfolioId::P5] {
            assert_eq!(id.accounting_model(), AccountingModel::Compounding);
        }
    }

    #[test]
    fn index_matches_reporting_order() {
        for (i, id) in PortfolioId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn display_uses_report_names() {
        assert_eq!(PortfolioId::P2.to_string(), "P2_SPY_vs_IWM");
        assert_eq!(AssetId::Iwm.to_string(), "IWM");
    }
}
