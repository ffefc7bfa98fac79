// Mycolog - core/store.rs
//
// Append-only growth log and its derived queries.
//
// Records keep insertion order. The store never reorders, edits, or
// removes a record; every query is a pure function of the current records.
// One store belongs to one session; it is not shared across threads.

use crate::core::alert::{self, AlertSet};
use crate::core::export;
use crate::core::filter::{self, LogbookFilter};
use crate::core::model::{
    AlertThresholds, GrowthLogRecord, LogbookRow, RecordInput, TrendPoint,
};
use crate::util::error::{ExportError, StoreError};
use chrono::NaiveDate;

/// Ordered, append-only collection of growth observations.
#[derive(Debug, Clone, Default)]
pub struct GrowthLogStore {
    records: Vec<GrowthLogRecord>,
}

impl GrowthLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record as the new tail of the log.
    pub fn append(&mut self, record: GrowthLogRecord) {
        tracing::debug!(
            index = self.records.len(),
            date = %record.date,
            stage = %record.stage,
            "Record appended"
        );
        self.records.push(record);
    }

    /// Validate a form payload and append it.
    ///
    /// A missing date becomes `today`. Fails only on an unknown stage, in
    /// which case the store is left unchanged.
    pub fn submit(
        &mut self,
        input: RecordInput,
        today: NaiveDate,
    ) -> Result<&GrowthLogRecord, StoreError> {
        let record = input.into_record(today)?;
        self.append(record);
        let idx = self.records.len() - 1;
        Ok(&self.records[idx])
    }

    /// Most recently appended record, or `None` when empty.
    pub fn latest(&self) -> Option<&GrowthLogRecord> {
        self.records.last()
    }

    /// Every record in insertion order, read-only.
    pub fn all(&self) -> &[GrowthLogRecord] {
        &self.records
    }

    /// Record at `index` (0-based insertion position).
    pub fn get(&self, index: usize) -> Option<&GrowthLogRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date/temperature/humidity projection in insertion order, one point
    /// per record. Empty when the store is empty.
    pub fn time_series(&self) -> Vec<TrendPoint> {
        self.records.iter().map(TrendPoint::from).collect()
    }

    /// Evaluate a record against `thresholds`. Does not touch stored records.
    pub fn evaluate_alerts(record: &GrowthLogRecord, thresholds: &AlertThresholds) -> AlertSet {
        alert::evaluate_alerts(record, thresholds)
    }

    /// Alerts for the latest record, or `None` when empty.
    pub fn latest_alerts(&self, thresholds: &AlertThresholds) -> Option<AlertSet> {
        self.latest()
            .map(|record| alert::evaluate_alerts(record, thresholds))
    }

    /// Table rows for every record, photo column omitted.
    pub fn logbook(&self) -> Vec<LogbookRow<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| LogbookRow::new(idx, record))
            .collect()
    }

    /// Table rows for records passing `filter`, in log order.
    pub fn logbook_filtered(&self, filter: &LogbookFilter) -> Vec<LogbookRow<'_>> {
        filter::apply_filters(&self.records, filter)
            .into_iter()
            .map(|idx| LogbookRow::new(idx, &self.records[idx]))
            .collect()
    }

    /// All records as CSV text with a header row. Header only when empty.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        export::to_csv_string(&self.records)
    }

    /// All records as a JSON array.
    pub fn to_json(&self) -> Result<String, ExportError> {
        export::to_json_string(&self.records)
    }
}
