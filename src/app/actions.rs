//! Side effects requested by the event handler.
//!
//! The handler never talks to the record store, the attendance relay or the
//! messaging webhook itself. It returns [`Action`]s, and the runtime (the CLI,
//! or any other host) executes them and feeds the results back as events.
//!
//! ```text
//! Event → handle_event → (state mutated, Vec<Action>) → runtime → Event …
//! ```

use crate::domain::AttendanceUpdate;
use chrono::NaiveDate;

/// Commands for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Loads a fresh record snapshot, replacing the current one on success.
    FetchSnapshot,

    /// Loads the attendance sheet for a cohort and day.
    FetchAttendance {
        cycle_id: String,
        date: NaiveDate,
    },

    /// Persists one arrival mark.
    ///
    /// The mark is already applied to local state; a failed submission is
    /// reported but not rolled back.
    SubmitAttendance(AttendanceUpdate),

    /// Sends one message to every listed phone.
    SendBulkMessage {
        /// De-duplicated, non-empty parent phones.
        recipients: Vec<String>,
        text: String,
    },

    /// Mirrors the shareable part of the state into the addressable location.
    SyncLocation(String),
}
