use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("day {index} is out of range for a series of {len} days")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid adjusted close {value} on day {day}")]
    InvalidPrice { day: usize, value: f64 },
    #[error("price table contains no rows")]
    Empty,
    #[error("failed to parse price table: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read price table: {0}")]
    Io(#[from] std::io::Error),
}
