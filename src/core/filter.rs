// Mycolog - core/filter.rs
//
// Composable logbook filters.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O.

use crate::core::model::{GrowthLogRecord, GrowthStage};
use crate::util::error::FilterError;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct LogbookFilter {
    /// Growth stages to include (empty = all).
    pub stages: HashSet<GrowthStage>,

    /// First date included. None = no lower bound.
    pub date_start: Option<NaiveDate>,

    /// Last date included. None = no upper bound.
    pub date_end: Option<NaiveDate>,

    /// Substring search over notes (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Compiled regex over notes. None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl LogbookFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
            && self.date_start.is_none()
            && self.date_end.is_none()
            && self.text_search.is_empty()
            && self.regex_search.is_none()
    }

    /// Filter that keeps a single stage.
    pub fn stage(stage: GrowthStage) -> Self {
        Self {
            stages: HashSet::from([stage]),
            ..Default::default()
        }
    }

    /// Set the notes regex, compiling it. An empty pattern clears it.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Whether a single record passes every active filter.
    pub fn matches(&self, record: &GrowthLogRecord) -> bool {
        matches_with_lowered(record, self, &self.text_search.to_lowercase())
    }
}

/// Apply filters to records, returning indices of matches in log order.
pub fn apply_filters(records: &[GrowthLogRecord], filter: &LogbookFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    // Lowercase the search once rather than per record.
    let text_lower = filter.text_search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_with_lowered(record, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_with_lowered(record: &GrowthLogRecord, filter: &LogbookFilter, text_lower: &str) -> bool {
    if !filter.stages.is_empty() && !filter.stages.contains(&record.stage) {
        return false;
    }

    if let Some(start) = filter.date_start {
        if record.date < start {
            return false;
        }
    }
    if let Some(end) = filter.date_end {
        if record.date > end {
            return false;
        }
    }

    if !text_lower.is_empty() && !record.notes.to_lowercase().contains(text_lower) {
        return false;
    }

    if let Some(ref regex) = filter.regex_search {
        if !regex.is_match(&record.notes) {
            return false;
        }
    }

    true
}
