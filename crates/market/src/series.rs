use crate::{MarketError, PriceRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Ordered daily prices for a single instrument, indexed by day offset.
///
/// The series is immutable once built; an environment borrows prices from it
/// for the lifetime of every episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Builds a series from already parsed records.
    ///
    /// An empty series is accepted; callers find out when they index it.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidPrice`] if any adjusted close is not a
    /// finite, strictly positive number.
    pub fn new(records: Vec<PriceRecord>) -> Result<Self, MarketError> {
        for (day, record) in records.iter().enumerate() {
            if !record.adj_close.is_finite() || record.adj_close <= 0.0 {
                return Err(MarketError::InvalidPrice {
                    day,
                    value: record.adj_close,
                });
            }
        }
        Ok(Self { records })
    }

    /// Builds a series from bare adjusted closes.
    ///
    /// # Errors
    ///
    /// Same validation as [`PriceSeries::new`].
    pub fn from_prices(prices: &[f64]) -> Result<Self, MarketError> {
        Self::new(prices.iter().copied().map(PriceRecord::from_adj_close).collect())
    }

    /// Parses a CSV price table with a header row.
    ///
    /// # Errors
    ///
    /// Fails on malformed CSV, a missing `Adj Close` column, a table without
    /// data rows, or an invalid price.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, MarketError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PriceRecord = row?;
            records.push(record);
        }
        if records.is_empty() {
            return Err(MarketError::Empty);
        }
        debug!("Parsed {} price rows", records.len());
        Self::new(records)
    }

    /// Opens and parses a CSV price table.
    ///
    /// # Errors
    ///
    /// See [`PriceSeries::from_csv_reader`]; also fails if the file cannot
    /// be opened.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, MarketError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    #[must_use]
    pub fn get(&self, day: usize) -> Option<&PriceRecord> {
        self.records.get(day)
    }

    /// Adjusted close on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::IndexOutOfRange`] past the end of the series.
    pub fn price(&self, day: usize) -> Result<f64, MarketError> {
        self.record(day).map(|record| record.adj_close)
    }

    /// Full record for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::IndexOutOfRange`] past the end of the series.
    pub fn record(&self, day: usize) -> Result<&PriceRecord, MarketError> {
        self.records.get(day).ok_or(MarketError::IndexOutOfRange {
            index: day,
            len: self.records.len(),
        })
    }

    #[must_use]
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }
}
