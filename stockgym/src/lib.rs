//! # StockGym
//!
//! A reinforcement learning environment for trading a single stock over a
//! daily price history, plus a small command line runner.
//!
//! ## Project Architecture
//!
//! -   **`stockgym`:** The crate you are currently viewing. It is the
//!     documentation entry point and ships the `stockgym` binary, which loads
//!     a price table, plays episodes with a simple policy and exports the
//!     resulting trade history.
//! -   **[`market`]:** Daily price records and CSV loading.
//! -   **[`rl`]:** The environment contract: the `Env` trait, action and
//!     observation spaces, policies and an episode driver.
//! -   **[`trading`]:** The trading environment itself.
//!
//! ## Getting Started
//!
//! ```text
//! stockgym --prices data/AAPL.csv --seed 7 --episodes 3 --history-out history.json
//! ```
//!
//! Set `RUST_LOG=debug` to log every step.

pub mod app;

pub use market;
pub use rl;
pub use trading;
