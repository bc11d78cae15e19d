#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Market Data
//!
//! Daily price history consumed by the trading environment.
//!
//! A [`PriceSeries`] is an ordered, immutable sequence of [`PriceRecord`]s
//! indexed by day offset starting at 0. Only the adjusted close is required;
//! it is used uniformly as "the" share price. Series are usually loaded from a
//! CSV export with an `Adj Close` column:
//!
//! ```rust,ignore
//! use market::PriceSeries;
//!
//! let series = PriceSeries::from_csv_path("data/AAPL.csv")?;
//! println!("{} trading days, first close {}", series.len(), series.price(0)?);
//! ```

mod error;
mod record;
mod series;

pub use error::MarketError;
pub use record::PriceRecord;
pub use series::PriceSeries;
