use serde::{Deserialize, Serialize};
use std::fmt;

/// One trading day of a price table.
///
/// Column names follow the common daily-bar export layout
/// (`Date,Open,High,Low,Close,Adj Close,Volume`). Every column except
/// `Adj Close` may be absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Open", default)]
    pub open: Option<f64>,
    #[serde(rename = "High", default)]
    pub high: Option<f64>,
    #[serde(rename = "Low", default)]
    pub low: Option<f64>,
    #[serde(rename = "Close", default)]
    pub close: Option<f64>,
    #[serde(rename = "Adj Close")]
    pub adj_close: f64,
    #[serde(rename = "Volume", default)]
    pub volume: Option<f64>,
}

impl PriceRecord {
    /// A record carrying nothing but an adjusted close.
    #[must_use]
    pub fn from_adj_close(adj_close: f64) -> Self {
        Self {
            date: None,
            open: None,
            high: None,
            low: None,
            close: None,
            adj_close,
            volume: None,
        }
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            write!(f, "Date={date}, ")?;
        }
        let optional = [
            ("Open", self.open),
            ("High", self.high),
            ("Low", self.low),
            ("Close", self.close),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                write!(f, "{label}={value}, ")?;
            }
        }
        write!(f, "Adj Close={}", self.adj_close)?;
        if let Some(volume) = self.volume {
            write!(f, ", Volume={volume}")?;
        }
        Ok(())
    }
}
