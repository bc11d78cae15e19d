//! The seven discrete trading actions.

use crate::TradingError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Order intensity in whole percent of current cash, indexed by action.
const PERCENT_POINTS: [u8; 7] = [1, 10, 20, 1, 10, 20, 0];

const NAMES: [&str; 7] = [
    "Buy little",
    "Buy moderate",
    "Buy lots",
    "Sell little",
    "Sell moderate",
    "Sell lots",
    "Hold",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeAction {
    BuyLittle,
    BuyModerate,
    BuyLots,
    SellLittle,
    SellModerate,
    SellLots,
    Hold,
}

impl TradeAction {
    /// Every action in index order.
    pub const ALL: [TradeAction; 7] = [
        TradeAction::BuyLittle,
        TradeAction::BuyModerate,
        TradeAction::BuyLots,
        TradeAction::SellLittle,
        TradeAction::SellModerate,
        TradeAction::SellLots,
        TradeAction::Hold,
    ];

    /// Size of the discrete action space.
    pub const COUNT: i64 = 7;

    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Intensity in whole percent: 1, 10 or 20 for trades, 0 for hold.
    #[must_use]
    pub fn percent_points(self) -> u8 {
        PERCENT_POINTS[self.index()]
    }

    /// Intensity as a fraction of current cash.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.percent_points()) / 100.0
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Human readable label, e.g. `"Sell moderate (10.0%)"`. Trades print
    /// their intensity with one decimal, hold prints `"Hold (0%)"`.
    #[must_use]
    pub fn describe(self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn is_buy(self) -> bool {
        matches!(
            self,
            TradeAction::BuyLittle | TradeAction::BuyModerate | TradeAction::BuyLots
        )
    }

    #[must_use]
    pub fn is_sell(self) -> bool {
        matches!(
            self,
            TradeAction::SellLittle | TradeAction::SellModerate | TradeAction::SellLots
        )
    }

    #[must_use]
    pub fn is_hold(self) -> bool {
        self == TradeAction::Hold
    }
}

impl TryFrom<i64> for TradeAction {
    type Error = TradingError;

    fn try_from(action: i64) -> Result<Self, Self::Error> {
        Self::from_index(action).ok_or(TradingError::InvalidAction { action })
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent_points() {
            0 => write!(f, "{} (0%)", self.name()),
            points => write!(f, "{} ({:.1}%)", self.name(), f64::from(points)),
        }
    }
}

/// Serialized as its description so exported histories stay readable.
impl Serialize for TradeAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
