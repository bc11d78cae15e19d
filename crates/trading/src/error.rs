use market::MarketError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradingError {
    #[error("action {action} is invalid, expected an integer in 0..=6")]
    InvalidAction { action: i64 },
    #[error("the environment must be reset before it can step or render")]
    NotReset,
    #[error("day {index} is out of range for a price series of {len} days")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("starting cash must be finite and non-negative, got {0}")]
    InvalidStartingCash(f64),
    #[error(transparent)]
    Market(#[from] MarketError),
    #[error("failed to render environment state: {0}")]
    Render(#[from] std::io::Error),
}
