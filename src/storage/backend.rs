//! Registration source abstraction.
//!
//! The dashboard reads its snapshot and attendance from an external store and
//! writes attendance marks back. [`RegistrationSource`] is the seam: the JSON
//! file backend implements it locally, and a remote proxy client would
//! implement the same three calls.

use crate::domain::error::Result;
use crate::domain::{AttendanceSheet, AttendanceUpdate};
use crate::storage::models::{SessionContext, Snapshot};
use chrono::NaiveDate;

/// Abstraction over registration stores.
///
/// Every call takes the caller's [`SessionContext`]; implementations reject an
/// invalid session before touching data.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use regdesk::storage::{JsonStore, RegistrationSource, SessionContext};
/// use std::path::PathBuf;
///
/// let store = JsonStore::new(PathBuf::from("/tmp/registrations.json"))?;
/// let snapshot = store.fetch_snapshot(&SessionContext::new("office"))?;
/// println!("{} records", snapshot.records.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait RegistrationSource: Send {
    /// Fetches the full record snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or the records cannot be
    /// read; record ids must be unique.
    fn fetch_snapshot(&self, session: &SessionContext) -> Result<Snapshot>;

    /// Fetches the attendance sheet for a cohort and day.
    ///
    /// A day with no marks yields an empty sheet, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or the read fails.
    fn fetch_attendance(&self, session: &SessionContext, cycle_id: &str, date: NaiveDate) -> Result<AttendanceSheet>;

    /// Persists a single arrival mark.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or the write fails.
    fn update_attendance(&mut self, session: &SessionContext, update: &AttendanceUpdate) -> Result<()>;
}
