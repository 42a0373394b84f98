//! JSON file-based registration store.
//!
//! Keeps the record list and attendance sheets in one human-readable JSON file.
//! Writes are atomic (write-to-temp + rename) so a crash never leaves a
//! half-written file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the whole file into memory once
//! - **Write**: serializes and rewrites the whole dataset
//! - **Best for**: a few thousand registrations, infrequent attendance writes

use crate::domain::error::{RegdeskError, Result};
use crate::domain::{AttendanceSheet, AttendanceUpdate, Record};
use crate::storage::backend::RegistrationSource;
use crate::storage::models::{ensure_unique_ids, AttendanceRecord, SessionContext, Snapshot};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Format version for future migrations.
    version: u32,

    #[serde(default)]
    records: Vec<Record>,

    #[serde(default)]
    attendance: Vec<AttendanceRecord>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
            attendance: Vec::new(),
        }
    }
}

/// Accepted file shapes: the store container, or a bare record array as the
/// upstream proxy returns it.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreFile {
    Store(StoreData),
    Records(Vec<Record>),
}

/// JSON file store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "records": [
///     { "id": "rec1", "childName": "נועה", "cycle": "חורף", "class": "ג2",
///       "needsPickup": true, "inWhatsappGroup": false, "cycleId": "c1" }
///   ],
///   "attendance": [
///     { "cycle_id": "c1", "date": "2025-01-05", "present": ["rec1"],
///       "updated_at": 1736064000, "updated_by": "office" }
///   ]
/// }
/// ```
pub struct JsonStore {
    file_path: PathBuf,
    data: StoreData,
    dirty: bool,
}

impl JsonStore {
    /// Opens the store at `file_path`, creating an empty one if the file is
    /// missing. Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot be
    /// read or parsed, or two records share an id.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(
            records = data.records.len(),
            attendance_sheets = data.attendance.len(),
            "store opened"
        );

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let file: StoreFile = serde_json::from_str(&contents)
            .map_err(|e| RegdeskError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        let data = match file {
            StoreFile::Store(data) => data,
            StoreFile::Records(records) => {
                tracing::debug!("loaded bare record array");
                StoreData {
                    records,
                    ..StoreData::default()
                }
            }
        };

        ensure_unique_ids(&data.records)?;
        Ok(data)
    }

    /// Writes pending changes to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temp-file write or the rename
    /// fails.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }

    fn sheet(&self, cycle_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.data
            .attendance
            .iter()
            .find(|a| a.cycle_id == cycle_id && a.date == date)
    }
}

impl RegistrationSource for JsonStore {
    fn fetch_snapshot(&self, session: &SessionContext) -> Result<Snapshot> {
        let _span = tracing::debug_span!("json_fetch_snapshot", user = %session.user).entered();
        session.ensure_valid()?;

        let snapshot = Snapshot::from_records(self.data.records.clone())?;
        tracing::debug!(records = snapshot.records.len(), "snapshot fetched");
        Ok(snapshot)
    }

    fn fetch_attendance(&self, session: &SessionContext, cycle_id: &str, date: NaiveDate) -> Result<AttendanceSheet> {
        let _span = tracing::debug_span!("json_fetch_attendance", cycle_id = %cycle_id, date = %date).entered();
        session.ensure_valid()?;

        let sheet = self
            .sheet(cycle_id, date)
            .cloned()
            .map_or_else(|| AttendanceSheet::new(cycle_id, date), AttendanceSheet::from);

        tracing::debug!(present = sheet.present.len(), "attendance fetched");
        Ok(sheet)
    }

    fn update_attendance(&mut self, session: &SessionContext, update: &AttendanceUpdate) -> Result<()> {
        let _span = tracing::debug_span!(
            "json_update_attendance",
            cycle_id = %update.cycle_id,
            date = %update.date,
            record_id = %update.record_id,
            present = update.present
        )
        .entered();
        session.ensure_valid()?;

        let known = self
            .data
            .records
            .iter()
            .any(|r| r.id == update.record_id && r.cycle_id.as_deref() == Some(update.cycle_id.as_str()));
        if !known {
            return Err(RegdeskError::Storage(format!(
                "record {} is not in cohort {}",
                update.record_id, update.cycle_id
            )));
        }

        let position = self
            .data
            .attendance
            .iter()
            .position(|a| a.cycle_id == update.cycle_id && a.date == update.date);
        let index = position.unwrap_or_else(|| {
            self.data
                .attendance
                .push(AttendanceRecord::new(update.cycle_id.clone(), update.date));
            self.data.attendance.len() - 1
        });

        let sheet = &mut self.data.attendance[index];
        if update.present {
            sheet.present.insert(update.record_id.clone());
        } else {
            sheet.present.remove(&update.record_id);
        }
        sheet.updated_at = Utc::now().timestamp();
        sheet.updated_by.clone_from(&session.user);

        self.dirty = true;
        self.save()
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty store on drop");
            if let Err(e) = self.save() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> SessionContext {
        SessionContext::new("office")
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    fn write(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("registrations.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("store.json")).unwrap();
        assert!(store.fetch_snapshot(&session()).unwrap().records.is_empty());
    }

    #[test]
    fn reads_bare_upstream_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"[{"id":"r1","childName":"Dana","school":"Alon"}]"#);

        let snapshot = JsonStore::new(path).unwrap().fetch_snapshot(&session()).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.catalog.values(crate::domain::Field::School), ["Alon"]);
    }

    #[test]
    fn duplicate_ids_fail_to_open() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"[{"id":"r1"},{"id":"r1"}]"#);
        assert!(matches!(JsonStore::new(path), Err(RegdeskError::Snapshot(_))));
    }

    #[test]
    fn invalid_session_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("store.json")).unwrap();
        let result = store.fetch_snapshot(&SessionContext::new(""));
        assert!(matches!(result, Err(RegdeskError::Session(_))));
    }

    #[test]
    fn attendance_update_persists_atomically() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"version":1,"records":[{"id":"r1","cycleId":"c1"}]}"#);

        let mut store = JsonStore::new(path.clone()).unwrap();
        let update = AttendanceUpdate {
            cycle_id: "c1".into(),
            date: day(),
            record_id: "r1".into(),
            present: true,
        };
        store.update_attendance(&session(), &update).unwrap();
        drop(store);

        assert!(!path.with_extension("tmp").exists());
        let reopened = JsonStore::new(path).unwrap();
        let sheet = reopened.fetch_attendance(&session(), "c1", day()).unwrap();
        assert!(sheet.is_present("r1"));
        assert_eq!(reopened.sheet("c1", day()).unwrap().updated_by, "office");
    }

    #[test]
    fn attendance_for_unknown_record_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"version":1,"records":[{"id":"r1","cycleId":"c1"}]}"#);
        let mut store = JsonStore::new(path).unwrap();

        let update = AttendanceUpdate {
            cycle_id: "c2".into(),
            date: day(),
            record_id: "r1".into(),
            present: true,
        };
        assert!(store.update_attendance(&session(), &update).is_err());
    }

    #[test]
    fn unmarked_day_is_an_empty_sheet() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("store.json")).unwrap();
        let sheet = store.fetch_attendance(&session(), "c1", day()).unwrap();
        assert!(sheet.present.is_empty());
        assert!(sheet.covers("c1", day()));
    }
}
