//! Storage-side types.
//!
//! These are the shapes exchanged with a [`RegistrationSource`](super::RegistrationSource)
//! and written to disk, kept apart from the domain types they convert into.

use crate::domain::error::{RegdeskError, Result};
use crate::domain::{AttendanceSheet, FieldCatalog, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Immutable record list for one session, plus its field metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub catalog: FieldCatalog,
}

impl Snapshot {
    /// Builds a snapshot, deriving the catalog from the records.
    ///
    /// # Errors
    ///
    /// Returns [`RegdeskError::Snapshot`] if two records share an id.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        ensure_unique_ids(&records)?;
        let catalog = FieldCatalog::from_records(&records);
        Ok(Self { records, catalog })
    }
}

/// Rejects a record list containing a repeated id.
///
/// # Errors
///
/// Returns [`RegdeskError::Snapshot`] naming the first repeated id.
pub fn ensure_unique_ids(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    match records.iter().find(|r| !seen.insert(r.id.as_str())) {
        Some(dup) => Err(RegdeskError::Snapshot(format!("duplicate record id: {}", dup.id))),
        None => Ok(()),
    }
}

/// Who is talking to the store.
///
/// Passed explicitly to every store call; the filter and pipeline layers never
/// see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user: String,
    pub opened_at: DateTime<Utc>,
}

impl SessionContext {
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            opened_at: Utc::now(),
        }
    }

    /// # Errors
    ///
    /// Returns [`RegdeskError::Session`] if no user is set.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(RegdeskError::Session("no user in session".to_string()));
        }
        Ok(())
    }
}

/// Persisted attendance for one cohort and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub cycle_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub present: BTreeSet<String>,
    /// Unix timestamp of the last change.
    pub updated_at: i64,
    /// User who made the last change.
    #[serde(default)]
    pub updated_by: String,
}

impl AttendanceRecord {
    #[must_use]
    pub fn new(cycle_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            date,
            present: BTreeSet::new(),
            updated_at: Utc::now().timestamp(),
            updated_by: String::new(),
        }
    }
}

impl From<AttendanceRecord> for AttendanceSheet {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            cycle_id: record.cycle_id,
            date: record.date,
            present: record.present,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![Record::new("a", "x"), Record::new("b", "y"), Record::new("a", "z")];
        let err = Snapshot::from_records(records).unwrap_err();
        assert!(err.to_string().contains("duplicate record id: a"));
    }

    #[test]
    fn blank_user_is_not_a_session() {
        assert!(SessionContext::new("  ").ensure_valid().is_err());
        assert!(SessionContext::new("office").ensure_valid().is_ok());
    }
}
