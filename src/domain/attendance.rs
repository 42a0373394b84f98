//! Daily attendance for a cohort.
//!
//! An [`AttendanceSheet`] is fetched per (cohort, date) and answers "did this
//! child arrive?". Marks are changed one at a time through [`AttendanceUpdate`],
//! which is what gets submitted back to the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Arrival marks for one cohort on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheet {
    pub cycle_id: String,
    pub date: NaiveDate,
    /// Record ids marked as arrived.
    #[serde(default)]
    pub present: BTreeSet<String>,
}

impl AttendanceSheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new(cycle_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            date,
            present: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_present(&self, record_id: &str) -> bool {
        self.present.contains(record_id)
    }

    /// Whether this sheet answers for the given cohort and date.
    #[must_use]
    pub fn covers(&self, cycle_id: &str, date: NaiveDate) -> bool {
        self.cycle_id == cycle_id && self.date == date
    }

    /// Applies a single mark.
    pub fn apply(&mut self, update: &AttendanceUpdate) {
        if update.present {
            self.present.insert(update.record_id.clone());
        } else {
            self.present.remove(&update.record_id);
        }
    }
}

/// A single arrival mark change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub cycle_id: String,
    pub date: NaiveDate,
    pub record_id: String,
    pub present: bool,
}
