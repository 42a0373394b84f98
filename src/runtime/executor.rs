//! Action executor bridging the event handler and a registration source.
//!
//! Every [`Action`] the handler emits is executed here against a
//! [`RegistrationSource`], and its outcome is fed back into the handler as a
//! follow-up [`Event`] until the queue drains.

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::storage::{RegistrationSource, SessionContext};
use std::collections::VecDeque;

/// A bulk message handed to the outbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub recipients: Vec<String>,
    pub text: String,
}

/// Drives [`AppState`] against a registration source.
pub struct Executor<S: RegistrationSource> {
    source: S,
    session: SessionContext,
    location: Option<String>,
    outbox: Vec<OutgoingMessage>,
    failures: Vec<String>,
}

impl<S: RegistrationSource> Executor<S> {
    #[must_use]
    pub const fn new(source: S, session: SessionContext) -> Self {
        Self {
            source,
            session,
            location: None,
            outbox: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Last location query the handler asked to sync.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Bulk messages composed so far.
    #[must_use]
    pub fn outbox(&self) -> &[OutgoingMessage] {
        &self.outbox
    }

    /// Failed submissions. Their optimistic local change is kept.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Handles `event` and every follow-up event its actions produce.
    ///
    /// Returns whether any step asked for a re-render.
    ///
    /// # Errors
    ///
    /// Returns an error only if the handler itself fails; source failures
    /// become `*Failed` events or entries in [`failures`](Self::failures).
    pub fn dispatch(&mut self, state: &mut AppState, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            let (needs_render, actions) = handle_event(state, &event)?;
            render |= needs_render;
            for action in actions {
                queue.extend(self.execute(action));
            }
        }
        Ok(render)
    }

    fn execute(&mut self, action: Action) -> Option<Event> {
        let _span = tracing::debug_span!("execute_action", action = action_name(&action)).entered();

        match action {
            Action::FetchSnapshot => Some(Self::handle_source_result(
                "fetch snapshot",
                self.source.fetch_snapshot(&self.session),
                Event::SnapshotLoaded,
                |error| Event::SnapshotFailed { error },
            )),
            Action::FetchAttendance { cycle_id, date } => Some(Self::handle_source_result(
                "fetch attendance",
                self.source.fetch_attendance(&self.session, &cycle_id, date),
                Event::AttendanceLoaded,
                |error| Event::AttendanceFailed { error },
            )),
            Action::SubmitAttendance(update) => {
                if let Err(e) = self.source.update_attendance(&self.session, &update) {
                    tracing::error!(record_id = %update.record_id, error = %e, "attendance submission failed");
                    self.failures.push(format!("submit attendance: {e}"));
                }
                None
            }
            Action::SendBulkMessage { recipients, text } => {
                tracing::info!(recipients = recipients.len(), "bulk message queued");
                self.outbox.push(OutgoingMessage { recipients, text });
                None
            }
            Action::SyncLocation(query) => {
                tracing::debug!(query = %query, "location synced");
                self.location = Some(query);
                None
            }
        }
    }

    /// Maps a source result to the success or failure event, logging either way.
    fn handle_source_result<T>(
        operation: &str,
        result: Result<T>,
        on_success: impl FnOnce(T) -> Event,
        on_failure: impl FnOnce(String) -> Event,
    ) -> Event {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "source operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "source operation failed");
                on_failure(format!("{operation}: {e}"))
            }
        }
    }
}

const fn action_name(action: &Action) -> &'static str {
    match action {
        Action::FetchSnapshot => "fetch_snapshot",
        Action::FetchAttendance { .. } => "fetch_attendance",
        Action::SubmitAttendance(_) => "submit_attendance",
        Action::SendBulkMessage { .. } => "send_bulk_message",
        Action::SyncLocation(_) => "sync_location",
    }
}
