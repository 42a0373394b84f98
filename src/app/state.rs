//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the dashboard. It separates
//! core data (the snapshot, attendance marks) from the user's view settings
//! (filters, search, sort, page, view mode) and from derived data, which the
//! memoized [`Pipeline`] recomputes whenever an input changes.
//!
//! # State Components
//!
//! - **Snapshot**: records plus field catalog, replaced wholesale on refresh
//! - **Filters / search / sort / page**: volatile per session
//! - **View mode, cohort, date**: mirrored into the shareable location
//! - **Attendance**: the sheet for the active cohort and date, if loaded
//!
//! # Example
//!
//! ```
//! use regdesk::app::AppState;
//! use regdesk::domain::Record;
//! use regdesk::storage::Snapshot;
//! use regdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.load_snapshot(Snapshot::from_records(vec![Record::new("1", "Dana")]).unwrap());
//! assert_eq!(state.output().total_records, 1);
//! ```

use super::location::ShareableLocation;
use super::modes::ViewMode;
use crate::domain::{AttendanceSheet, Field, FieldCatalog, FieldValue, Record};
use crate::filter::{FilterMode, FilterState};
use crate::pipeline::{
    total_pages, value_counts, Collator, Pagination, Pipeline, PipelineInputs, PipelineOutput, Scope, SearchQuery,
    SortState, ValueCount,
};
use crate::storage::Snapshot;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BadgeInfo, EmptyState, FooterInfo, HeaderInfo, RowItem, SearchBarInfo, UIViewModel};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Snapshot load status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No snapshot yet; rendering is gated.
    #[default]
    Loading,
    Ready,
    /// Terminal until the user refreshes.
    Failed(String),
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    records: Vec<Record>,
    catalog: FieldCatalog,
    snapshot_generation: u64,

    /// Snapshot load status.
    pub load: LoadState,

    filters: FilterState,
    filter_generation: u64,

    /// Search box contents as typed.
    pub search_input: String,
    query: SearchQuery,

    pub sort: SortState,
    pub pagination: Pagination,

    pub view_mode: ViewMode,
    /// Active cohort id.
    pub cohort: Option<String>,
    /// Active attendance date.
    pub date: Option<NaiveDate>,
    /// Marks for the active cohort and date, once loaded.
    pub attendance: Option<AttendanceSheet>,

    /// Color scheme for rendering.
    pub theme: Theme,

    pipeline: Pipeline,
}

impl AppState {
    /// Creates an empty state waiting for its first snapshot.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_collator(theme, Collator::default())
    }

    #[must_use]
    pub fn with_collator(theme: Theme, collator: Collator) -> Self {
        let mut state = Self {
            records: Vec::new(),
            catalog: FieldCatalog::default(),
            snapshot_generation: 0,
            load: LoadState::Loading,
            filters: FilterState::default(),
            filter_generation: 0,
            search_input: String::new(),
            query: SearchQuery::default(),
            sort: SortState::default(),
            pagination: Pagination::default(),
            view_mode: ViewMode::default(),
            cohort: None,
            date: None,
            attendance: None,
            theme,
            pipeline: Pipeline::new(collator),
        };
        state.recompute();
        state
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub const fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Replaces the snapshot wholesale and resets the page.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            records = snapshot.records.len(),
            generation = self.snapshot_generation + 1,
            "snapshot loaded"
        );
        self.records = snapshot.records;
        self.catalog = snapshot.catalog;
        self.snapshot_generation += 1;
        self.load = LoadState::Ready;
        self.pagination.reset();
        self.recompute();
    }

    /// Applies `edit` to the filter state, then resets the page and recomputes.
    ///
    /// Returns what `edit` returned.
    pub fn edit_filters<R>(&mut self, edit: impl FnOnce(&mut FilterState) -> R) -> R {
        let before = self.filters.clone();
        let result = edit(&mut self.filters);
        if self.filters != before {
            self.filter_generation += 1;
            self.pagination.reset();
            self.recompute();
        }
        result
    }

    /// Sets the search text. The page resets only if the normalized query changed.
    pub fn set_search(&mut self, input: &str) {
        input.clone_into(&mut self.search_input);
        let query = SearchQuery::new(input);
        if query != self.query {
            self.query = query;
            self.pagination.reset();
            self.recompute();
        }
    }

    /// Applies one header click. Sorting never resets the page.
    pub fn click_sort(&mut self, field: Field) {
        self.sort.click(field);
        self.recompute();
    }

    /// Base set for the current view.
    #[must_use]
    pub fn scope(&self) -> Scope {
        match (self.view_mode, &self.cohort) {
            (ViewMode::Registrations, _) => Scope::All,
            (ViewMode::Arrivals, Some(cohort)) => Scope::Cohort(cohort.clone()),
            (ViewMode::Arrivals, None) => Scope::Empty,
        }
    }

    /// Changes view mode, cohort or date; resets the page if the base set changed.
    pub fn set_location(&mut self, view_mode: ViewMode, cohort: Option<String>, date: Option<NaiveDate>) {
        let scope_before = self.scope();
        self.view_mode = view_mode;
        self.cohort = cohort;
        self.date = date;

        let covered = match (&self.attendance, &self.cohort, self.date) {
            (Some(sheet), Some(cohort), Some(date)) => sheet.covers(cohort, date),
            _ => false,
        };
        if !covered {
            self.attendance = None;
        }

        if self.scope() != scope_before {
            self.pagination.reset();
        }
        self.recompute();
    }

    /// Brings the memoized pipeline up to date.
    pub fn recompute(&mut self) {
        let scope = self.scope();
        let inputs = PipelineInputs {
            records: &self.records,
            snapshot_generation: self.snapshot_generation,
            scope: &scope,
            filters: &self.filters,
            filter_generation: self.filter_generation,
            query: &self.query,
            sort: self.sort,
        };
        self.pipeline.run(&inputs);
    }

    /// All records in the current result, across pages.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.pipeline.records(&self.records)
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.pipeline.indices().len())
    }

    /// Current page of the result.
    #[must_use]
    pub fn output(&self) -> PipelineOutput<'_> {
        self.pipeline.output(&self.records, self.pagination.page())
    }

    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn location(&self) -> ShareableLocation {
        ShareableLocation {
            cohort: self.cohort.clone(),
            date: self.date,
            view: self.view_mode,
        }
    }

    /// Whether the record is marked as arrived on the loaded sheet.
    #[must_use]
    pub fn is_present(&self, record_id: &str) -> bool {
        self.attendance.as_ref().is_some_and(|s| s.is_present(record_id))
    }

    /// Distinct non-blank parent phones of the whole current result, in result
    /// order.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.visible_records()
            .map(|r| r.parent_phone.trim())
            .filter(|phone| !phone.is_empty() && seen.insert(*phone))
            .map(str::to_string)
            .collect()
    }

    /// Badge counts for a bounded field over the current result.
    #[must_use]
    pub fn badge_counts(&self, field: Field) -> Vec<ValueCount> {
        let visible: Vec<&Record> = self.visible_records().collect();
        value_counts(&visible, field, self.catalog.values(field))
    }

    /// Computes a renderable view model for a terminal `cols` wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let output = self.output();
        let arrivals = self.view_mode == ViewMode::Arrivals;

        let rows = output
            .rows
            .iter()
            .map(|record| RowItem {
                cells: Self::columns(arrivals)
                    .iter()
                    .map(|&field| cell_text(record.value(field)))
                    .collect(),
                arrived: arrivals.then(|| self.is_present(&record.id)),
            })
            .collect();

        UIViewModel {
            header: self.compute_header(&output),
            columns: Self::columns(arrivals)
                .iter()
                .map(|&field| self.column_label(field))
                .collect(),
            rows,
            badges: self.compute_badges(),
            footer: FooterInfo {
                text: format!(
                    "page {}/{}  ·  {} records",
                    output.page, output.total_pages, output.total_records
                ),
            },
            search_bar: (!self.query.is_empty()).then(|| SearchBarInfo {
                query: self.search_input.trim().to_string(),
            }),
            empty_state: self.compute_empty_state(&output),
            width: cols,
        }
    }

    fn columns(arrivals: bool) -> &'static [Field] {
        const REGISTRATIONS: [Field; 9] = [
            Field::ChildName,
            Field::ParentName,
            Field::ParentPhone,
            Field::School,
            Field::ClassName,
            Field::Course,
            Field::Cycle,
            Field::TrialDate,
            Field::Status,
        ];
        const ARRIVALS: [Field; 5] = [
            Field::ChildName,
            Field::ParentPhone,
            Field::ClassName,
            Field::NeedsPickup,
            Field::Status,
        ];
        if arrivals {
            &ARRIVALS
        } else {
            &REGISTRATIONS
        }
    }

    fn column_label(&self, field: Field) -> String {
        match self.sort.key {
            Some(key) if key == field => format!("{} {}", field.label(), self.sort.direction.arrow()),
            _ => field.label().to_string(),
        }
    }

    fn compute_header(&self, output: &PipelineOutput<'_>) -> HeaderInfo {
        let scope = match (self.view_mode, &self.cohort, self.date) {
            (ViewMode::Arrivals, Some(cohort), Some(date)) => format!(" · {cohort} · {date}"),
            (ViewMode::Arrivals, Some(cohort), None) => format!(" · {cohort}"),
            _ => String::new(),
        };
        HeaderInfo {
            title: format!(
                " {}{scope} ({}/{}) [{}] ",
                self.view_mode.title(),
                output.total_records,
                self.records.len(),
                self.filters.mode_name()
            ),
        }
    }

    fn compute_badges(&self) -> Vec<BadgeInfo> {
        let mut badges = Vec::new();
        match self.filters.mode() {
            FilterMode::Simple => {
                badges.extend(self.filters.simple.values.iter().map(|(field, value)| BadgeInfo {
                    label: format!("{field}={value}"),
                    count: self.count_matching(*field, value),
                }));
            }
            FilterMode::Advanced => {
                for (field, values) in &self.filters.advanced.values {
                    badges.extend(values.iter().map(|value| BadgeInfo {
                        label: format!("{field}∈{value}"),
                        count: self.count_matching(*field, value),
                    }));
                }
            }
            FilterMode::Grouped => {
                badges.extend(self.filters.groups.iter().map(|group| BadgeInfo {
                    label: format!("group {} ({} conditions)", group.id, group.conditions.len()),
                    count: self.visible_records().filter(|r| group.matches(r)).count(),
                }));
            }
        }
        badges
    }

    fn count_matching(&self, field: Field, value: &str) -> usize {
        let visible: Vec<&Record> = self.visible_records().collect();
        value_counts(&visible, field, &[value.to_string()])
            .first()
            .map_or(0, |c| c.count)
    }

    fn compute_empty_state(&self, output: &PipelineOutput<'_>) -> Option<EmptyState> {
        match &self.load {
            LoadState::Loading => Some(EmptyState {
                message: "Loading registrations…".to_string(),
                subtitle: String::new(),
            }),
            LoadState::Failed(error) => Some(EmptyState {
                message: "Could not load registrations".to_string(),
                subtitle: format!("{error} · refresh to retry"),
            }),
            LoadState::Ready if output.total_records > 0 => None,
            LoadState::Ready if self.view_mode == ViewMode::Arrivals && self.cohort.is_none() => Some(EmptyState {
                message: "No cohort selected".to_string(),
                subtitle: "choose a cohort to see arrivals".to_string(),
            }),
            LoadState::Ready => Some(EmptyState {
                message: "No matching registrations".to_string(),
                subtitle: "adjust filters or search".to_string(),
            }),
        }
    }
}

/// Table cell text; flags show as a check mark or blank.
fn cell_text(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Flag(true) => "✓".to_string(),
        FieldValue::Flag(false) => String::new(),
        other => other.as_text().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::BoolOp;

    fn snapshot() -> Snapshot {
        let records = (0..120)
            .map(|i| Record {
                school: (if i < 100 { "Alon" } else { "Ort" }).to_string(),
                parent_phone: format!("05{:08}", i % 7),
                cycle_id: Some((if i % 2 == 0 { "c1" } else { "c2" }).to_string()),
                ..Record::new(format!("r{i:03}"), format!("child {i:03}"))
            })
            .collect();
        Snapshot::from_records(records).unwrap()
    }

    fn ready() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.load_snapshot(snapshot());
        state
    }

    #[test]
    fn filter_change_resets_page_but_sort_does_not() {
        let mut state = ready();
        state.pagination.go_to(3, state.total_pages());
        state.click_sort(Field::ChildName);
        assert_eq!(state.pagination.page(), 3);

        state.edit_filters(|f| f.simple_mut().map(|s| s.set(Field::School, "Alon")));
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.output().total_records, 100);
    }

    #[test]
    fn unchanged_filter_edit_keeps_page_and_cache() {
        let mut state = ready();
        state.pagination.go_to(2, state.total_pages());
        let before = state.pipeline().recomputations();

        state.edit_filters(|f| f.set_group_operator(BoolOp::Or));
        assert_eq!(state.pagination.page(), 2);
        assert_eq!(state.pipeline().recomputations(), before);
    }

    #[test]
    fn search_resets_page_only_when_query_changes() {
        let mut state = ready();
        state.pagination.go_to(2, state.total_pages());
        state.set_search("  ");
        assert_eq!(state.pagination.page(), 2);

        state.set_search("child 11");
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.output().total_records, 10);
    }

    #[test]
    fn arrivals_scope_follows_cohort() {
        let mut state = ready();
        state.set_location(ViewMode::Arrivals, None, None);
        assert_eq!(state.output().total_records, 0);

        state.set_location(ViewMode::Arrivals, Some("c1".into()), None);
        assert_eq!(state.output().total_records, 60);
    }

    #[test]
    fn recipients_are_distinct_phones() {
        let state = ready();
        assert_eq!(state.recipients().len(), 7);
    }

    #[test]
    fn viewmodel_reports_page_and_totals() {
        let mut state = ready();
        state.pagination.go_to(3, state.total_pages());
        let vm = state.compute_viewmodel(120);
        assert_eq!(vm.rows.len(), 20);
        assert_eq!(vm.footer.text, "page 3/3  ·  120 records");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn loading_state_shows_placeholder() {
        let state = AppState::new(Theme::default());
        let vm = state.compute_viewmodel(80);
        assert!(vm.empty_state.is_some());
        assert_eq!(state.total_pages(), 1);
    }
}
