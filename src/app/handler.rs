//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It processes user input
//! and fetch results, mutates [`AppState`], and returns whether a re-render is
//! needed plus the [`Action`]s the runtime should execute.
//!
//! # Event Types
//!
//! - **Snapshot**: `SnapshotLoaded`, `SnapshotFailed`, `Refresh`
//! - **Search / sort / paging**: `SetSearch`, `ClearSearch`, `SortBy`,
//!   `NextPage`, `PrevPage`, `GoToPage`
//! - **Filters**: simple, advanced and condition-group edits, `ReplaceFilters`,
//!   `ClearFilters`
//! - **Location**: `SelectCohort`, `SelectDate`, `SetViewMode`
//! - **Attendance**: `AttendanceLoaded`, `AttendanceFailed`, `ToggleArrival`
//! - **Messaging**: `ComposeBulkMessage`
//!
//! # Example
//!
//! ```
//! use regdesk::app::{handle_event, Action, AppState, Event};
//! use regdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::FetchSnapshot]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::ViewMode;
use super::state::LoadState;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{AttendanceSheet, AttendanceUpdate, Field};
use crate::filter::{BoolOp, Condition, ConditionGroup, FilterState};
use crate::storage::Snapshot;
use chrono::NaiveDate;

/// Events triggered by user input or by completed fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A snapshot fetch completed.
    SnapshotLoaded(Snapshot),
    /// A snapshot fetch failed; the view shows a terminal error.
    SnapshotFailed {
        error: String,
    },
    /// Reloads the snapshot.
    Refresh,

    SetSearch(String),
    ClearSearch,
    /// One click on a column header.
    SortBy(Field),
    NextPage,
    PrevPage,
    GoToPage(usize),

    /// Turns advanced mode on or off. Filters of the inactive mode are kept
    /// and return when the mode is switched back.
    SetAdvancedMode(bool),
    /// Sets a legacy simple-mode value; an empty value clears it.
    SetSimpleFilter {
        field: Field,
        value: String,
    },
    /// Adds or removes a value in an advanced multi-select.
    ToggleAdvancedValue {
        field: Field,
        value: String,
    },
    /// Sets or clears an advanced boolean filter.
    SetAdvancedFlag {
        field: Field,
        value: Option<bool>,
    },
    SetAdvancedOperator(BoolOp),
    /// Appends a condition group; ignored in simple mode.
    AddGroup(ConditionGroup),
    RemoveGroup {
        group_id: String,
    },
    AddCondition {
        group_id: String,
        condition: Condition,
    },
    RemoveCondition {
        group_id: String,
        condition_id: String,
    },
    SetGroupOperator {
        group_id: String,
        operator: BoolOp,
    },
    /// Sets the operator applied between groups.
    SetInterGroupOperator(BoolOp),
    /// Replaces the whole filter state, e.g. from a saved file.
    ReplaceFilters(FilterState),
    ClearFilters,

    SelectCohort(Option<String>),
    SelectDate(Option<NaiveDate>),
    SetViewMode(ViewMode),

    /// An attendance fetch completed.
    AttendanceLoaded(AttendanceSheet),
    AttendanceFailed {
        error: String,
    },
    /// Flips one child's arrival mark for the active cohort and date.
    ToggleArrival {
        record_id: String,
    },

    /// Sends `text` to every parent in the current result.
    ComposeBulkMessage {
        text: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(render, actions)`: whether the view changed, and the side effects
/// to run in order. Filter, search and snapshot changes reset the page to 1;
/// sort changes do not.
///
/// # Errors
///
/// Reserved for handlers that validate input; none of the current events fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::SnapshotLoaded(snapshot) => {
            state.load_snapshot(snapshot.clone());
            Ok((true, attendance_fetch(state).into_iter().collect()))
        }
        Event::SnapshotFailed { error } => {
            tracing::error!(error = %error, "snapshot load failed");
            state.load = LoadState::Failed(error.clone());
            Ok((true, vec![]))
        }
        Event::Refresh => {
            state.load = LoadState::Loading;
            Ok((true, vec![Action::FetchSnapshot]))
        }

        Event::SetSearch(text) => {
            state.set_search(text);
            Ok((true, vec![]))
        }
        Event::ClearSearch => {
            state.set_search("");
            Ok((true, vec![]))
        }
        Event::SortBy(field) => {
            state.click_sort(*field);
            tracing::debug!(key = ?state.sort.key, direction = ?state.sort.direction, "sort changed");
            Ok((true, vec![]))
        }
        Event::NextPage => {
            let total = state.total_pages();
            state.pagination.next(total);
            Ok((true, vec![]))
        }
        Event::PrevPage => {
            let total = state.total_pages();
            state.pagination.prev(total);
            Ok((true, vec![]))
        }
        Event::GoToPage(page) => {
            let total = state.total_pages();
            state.pagination.go_to(*page, total);
            Ok((true, vec![]))
        }

        Event::SetAdvancedMode(on) => {
            state.edit_filters(|f| f.set_advanced(*on));
            Ok((true, vec![]))
        }
        Event::SetSimpleFilter { field, value } => {
            let applied = state.edit_filters(|f| f.simple_mut().map(|s| s.set(*field, value.as_str())));
            if applied.is_none() {
                tracing::debug!(field = %field, "simple filter ignored outside simple mode");
            }
            Ok((applied.is_some(), vec![]))
        }
        Event::ToggleAdvancedValue { field, value } => {
            let applied = state.edit_filters(|f| f.advanced_mut().map(|a| a.toggle_value(*field, value.as_str())));
            Ok((applied.is_some(), vec![]))
        }
        Event::SetAdvancedFlag { field, value } => {
            if !field.is_flag() {
                tracing::debug!(field = %field, "ignoring flag filter on non-boolean field");
                return Ok((false, vec![]));
            }
            let applied = state.edit_filters(|f| f.advanced_mut().map(|a| a.set_flag(*field, *value)));
            Ok((applied.is_some(), vec![]))
        }
        Event::SetAdvancedOperator(operator) => {
            let applied = state.edit_filters(|f| f.advanced_mut().map(|a| a.operator = *operator));
            Ok((applied.is_some(), vec![]))
        }
        Event::AddGroup(group) => {
            let added = state.edit_filters(|f| f.add_group(group.clone()));
            Ok((added, vec![]))
        }
        Event::RemoveGroup { group_id } => {
            let removed = state.edit_filters(|f| f.remove_group(group_id));
            Ok((removed, vec![]))
        }
        Event::AddCondition { group_id, condition } => {
            let added = state.edit_filters(|f| f.add_condition(group_id, condition.clone()));
            if !added {
                tracing::debug!(group_id = %group_id, "no such group");
            }
            Ok((added, vec![]))
        }
        Event::RemoveCondition { group_id, condition_id } => {
            let removed = state.edit_filters(|f| {
                f.group_mut(group_id)
                    .is_some_and(|g| g.remove_condition(condition_id))
            });
            Ok((removed, vec![]))
        }
        Event::SetGroupOperator { group_id, operator } => {
            let applied = state.edit_filters(|f| f.group_mut(group_id).map(|g| g.operator = *operator));
            Ok((applied.is_some(), vec![]))
        }
        Event::SetInterGroupOperator(operator) => {
            let applied = state.edit_filters(|f| f.set_group_operator(*operator));
            Ok((applied, vec![]))
        }
        Event::ReplaceFilters(filters) => {
            state.edit_filters(|f| f.clone_from(filters));
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.edit_filters(FilterState::clear);
            Ok((true, vec![]))
        }

        Event::SelectCohort(cohort) => {
            let (view, date) = (state.view_mode, state.date);
            Ok(relocate(state, view, cohort.clone(), date))
        }
        Event::SelectDate(date) => {
            let (view, cohort) = (state.view_mode, state.cohort.clone());
            Ok(relocate(state, view, cohort, *date))
        }
        Event::SetViewMode(view) => {
            let (cohort, date) = (state.cohort.clone(), state.date);
            Ok(relocate(state, *view, cohort, date))
        }

        Event::AttendanceLoaded(sheet) => {
            let current = match (&state.cohort, state.date) {
                (Some(cohort), Some(date)) => sheet.covers(cohort, date),
                _ => false,
            };
            if !current {
                tracing::debug!(cycle_id = %sheet.cycle_id, date = %sheet.date, "dropping stale attendance sheet");
                return Ok((false, vec![]));
            }
            state.attendance = Some(sheet.clone());
            Ok((true, vec![]))
        }
        Event::AttendanceFailed { error } => {
            tracing::warn!(error = %error, "attendance request failed");
            Ok((false, vec![]))
        }
        Event::ToggleArrival { record_id } => Ok(toggle_arrival(state, record_id)),

        Event::ComposeBulkMessage { text } => {
            let text = text.trim();
            let recipients = state.recipients();
            if text.is_empty() || recipients.is_empty() {
                tracing::debug!(recipients = recipients.len(), "nothing to send");
                return Ok((false, vec![]));
            }
            tracing::info!(recipients = recipients.len(), "bulk message composed");
            Ok((
                false,
                vec![Action::SendBulkMessage {
                    recipients,
                    text: text.to_string(),
                }],
            ))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SnapshotLoaded(_) => "snapshot_loaded",
        Event::SnapshotFailed { .. } => "snapshot_failed",
        Event::Refresh => "refresh",
        Event::SetSearch(_) => "set_search",
        Event::ClearSearch => "clear_search",
        Event::SortBy(_) => "sort_by",
        Event::NextPage => "next_page",
        Event::PrevPage => "prev_page",
        Event::GoToPage(_) => "go_to_page",
        Event::SetAdvancedMode(_) => "set_advanced_mode",
        Event::SetSimpleFilter { .. } => "set_simple_filter",
        Event::ToggleAdvancedValue { .. } => "toggle_advanced_value",
        Event::SetAdvancedFlag { .. } => "set_advanced_flag",
        Event::SetAdvancedOperator(_) => "set_advanced_operator",
        Event::AddGroup(_) => "add_group",
        Event::RemoveGroup { .. } => "remove_group",
        Event::AddCondition { .. } => "add_condition",
        Event::RemoveCondition { .. } => "remove_condition",
        Event::SetGroupOperator { .. } => "set_group_operator",
        Event::SetInterGroupOperator(_) => "set_inter_group_operator",
        Event::ReplaceFilters(_) => "replace_filters",
        Event::ClearFilters => "clear_filters",
        Event::SelectCohort(_) => "select_cohort",
        Event::SelectDate(_) => "select_date",
        Event::SetViewMode(_) => "set_view_mode",
        Event::AttendanceLoaded(_) => "attendance_loaded",
        Event::AttendanceFailed { .. } => "attendance_failed",
        Event::ToggleArrival { .. } => "toggle_arrival",
        Event::ComposeBulkMessage { .. } => "compose_bulk_message",
    }
}

/// Moves to a new location, syncing it outward and fetching attendance when
/// the arrivals view needs a sheet it does not have.
fn relocate(state: &mut AppState, view: ViewMode, cohort: Option<String>, date: Option<NaiveDate>) -> (bool, Vec<Action>) {
    let before = state.location();
    state.set_location(view, cohort, date);
    let after = state.location();

    if after == before {
        return (false, vec![]);
    }

    let mut actions = vec![Action::SyncLocation(after.to_query())];
    actions.extend(attendance_fetch(state));
    (true, actions)
}

fn attendance_fetch(state: &AppState) -> Option<Action> {
    if state.view_mode != ViewMode::Arrivals || state.attendance.is_some() {
        return None;
    }
    let (Some(cohort), Some(date)) = (&state.cohort, state.date) else {
        return None;
    };
    Some(Action::FetchAttendance {
        cycle_id: cohort.clone(),
        date,
    })
}

fn toggle_arrival(state: &mut AppState, record_id: &str) -> (bool, Vec<Action>) {
    let (Some(cohort), Some(date)) = (state.cohort.clone(), state.date) else {
        tracing::debug!("arrival toggle needs a cohort and a date");
        return (false, vec![]);
    };
    if state.view_mode != ViewMode::Arrivals {
        return (false, vec![]);
    }

    let in_cohort = state
        .records()
        .iter()
        .any(|r| r.id == record_id && r.cycle_id.as_deref() == Some(cohort.as_str()));
    if !in_cohort {
        tracing::debug!(record_id = %record_id, cohort = %cohort, "record not in active cohort");
        return (false, vec![]);
    }

    let update = AttendanceUpdate {
        present: !state.is_present(record_id),
        cycle_id: cohort.clone(),
        date,
        record_id: record_id.to_string(),
    };

    state
        .attendance
        .get_or_insert_with(|| AttendanceSheet::new(cohort, date))
        .apply(&update);

    tracing::debug!(record_id = %record_id, present = update.present, "arrival toggled");
    (true, vec![Action::SubmitAttendance(update)])
}
