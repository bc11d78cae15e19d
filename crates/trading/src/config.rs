use serde::{Deserialize, Serialize};

/// Cash an episode starts with unless overridden.
pub const DEFAULT_STARTING_CASH: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Print the state to stdout after every step.
    Human,
}

/// Cash credited when a sell order exceeds the shares held and the
/// remaining position is liquidated instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidationProceeds {
    /// Historical behaviour: the position is zeroed before the proceeds are
    /// computed, so nothing is credited.
    #[default]
    Dropped,
    /// The liquidated shares are paid out at the current price.
    Credited,
}

/// Configuration for a [`StockEnv`](crate::StockEnv).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockEnvConfig {
    /// Console rendering after each step; `None` disables it.
    pub render_mode: Option<RenderMode>,
    /// Cash at reset when the reset options do not override it.
    pub starting_cash: f64,
    /// Payout rule for partial liquidations.
    pub liquidation: LiquidationProceeds,
}

impl Default for StockEnvConfig {
    fn default() -> Self {
        Self {
            render_mode: None,
            starting_cash: DEFAULT_STARTING_CASH,
            liquidation: LiquidationProceeds::Dropped,
        }
    }
}

/// Per-episode overrides passed to [`rl::Env::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResetOptions {
    pub starting_cash: Option<f64>,
}
