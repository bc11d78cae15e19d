use crate::{SimulationState, TradeAction};
use serde::Serialize;
use std::io::Write;

/// State of the portfolio after one completed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub day: usize,
    pub cash: f64,
    pub shares_owned: f64,
    pub owned_shares_value: f64,
    pub total_value: f64,
    pub action: TradeAction,
}

impl TradeRecord {
    pub(crate) fn new(state: &SimulationState, action: TradeAction) -> Self {
        Self {
            day: state.step_index,
            cash: state.cash,
            shares_owned: state.shares_owned,
            owned_shares_value: state.share_value,
            total_value: state.total_value,
            action,
        }
    }
}

/// Append-only log of an episode, one record per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeHistory {
    records: Vec<TradeRecord>,
}

/// Column-oriented view of a [`TradeHistory`], one vector per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryColumns {
    pub day: Vec<usize>,
    pub cash: Vec<f64>,
    pub shares_owned: Vec<f64>,
    pub owned_shares_value: Vec<f64>,
    pub total_value: Vec<f64>,
    pub action_selected: Vec<String>,
}

impl TradeHistory {
    pub(crate) fn push(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
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
    pub fn last(&self) -> Option<&TradeRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn columns(&self) -> HistoryColumns {
        let mut columns = HistoryColumns::default();
        for record in &self.records {
            columns.day.push(record.day);
            columns.cash.push(record.cash);
            columns.shares_owned.push(record.shares_owned);
            columns.owned_shares_value.push(record.owned_shares_value);
            columns.total_value.push(record.total_value);
            columns.action_selected.push(record.action.describe());
        }
        columns
    }

    /// Writes one CSV row per record, with a header.
    ///
    /// # Errors
    ///
    /// Returns any serialization or I/O error from the CSV writer.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TradeHistory {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
