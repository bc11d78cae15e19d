#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Single-Stock Trading Environment
//!
//! A reinforcement learning environment in which an agent trades one stock
//! over a daily price history. It implements the [`rl::Env`] contract: every
//! [`step`](rl::Env::step) advances one trading day, applies a buy, sell or
//! hold decision and rewards the agent with the change in portfolio value.
//!
//! ## Key Components
//!
//! -   **Actions:** [`TradeAction`] maps the seven discrete actions to an
//!     order direction and an intensity, the fraction of current cash used to
//!     size the order.
//! -   **Environment:** [`StockEnv`] owns the episode state (cash, shares,
//!     price, day) and the append-only [`TradeHistory`].
//! -   **Configuration:** [`StockEnvConfig`] selects console rendering, the
//!     default starting cash and how partial liquidations are paid out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market::PriceSeries;
//! use rl::Env;
//! use trading::{ResetOptions, StockEnv, StockEnvConfig, TradeAction};
//!
//! let series = PriceSeries::from_prices(&[10.0, 10.0, 20.0])?;
//! let mut env = StockEnv::new(series, StockEnvConfig::default());
//! let (obs, _) = env.reset(Some(7), ResetOptions { starting_cash: Some(100.0) })?;
//! let step = env.step(TradeAction::Hold.index() as i64)?;
//! assert!(!step.terminated);
//! ```

pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod history;
pub mod state;

pub use action::TradeAction;
pub use config::{
    LiquidationProceeds, RenderMode, ResetOptions, StockEnvConfig, DEFAULT_STARTING_CASH,
};
pub use env::{StepInfo, StockEnv};
pub use error::TradingError;
pub use history::{HistoryColumns, TradeHistory, TradeRecord};
pub use state::{Observation, SimulationState};
