//! Derived-view pipeline: filter → search → sort → paginate.
//!
//! Each stage is a pure function of its inputs and never mutates the snapshot.
//! [`Pipeline`] memoizes the ordered result as indices into the snapshot, keyed
//! on everything the result depends on:
//!
//! ```text
//! (snapshot generation, scope, filter generation, query) → filtered indices
//!                                             + sort state → ordered indices
//! ```
//!
//! A sort-only change reuses the filtered indices and only re-sorts. Any other
//! change recomputes from scratch.
//!
//! # Example
//!
//! ```
//! use regdesk::domain::Record;
//! use regdesk::filter::FilterState;
//! use regdesk::pipeline::{Pipeline, PipelineInputs, Scope, SearchQuery, SortState};
//!
//! let records = vec![Record::new("1", "Dana"), Record::new("2", "Noa")];
//! let filters = FilterState::default();
//! let query = SearchQuery::new("noa");
//! let inputs = PipelineInputs {
//!     records: &records,
//!     snapshot_generation: 0,
//!     scope: &Scope::All,
//!     filters: &filters,
//!     filter_generation: 0,
//!     query: &query,
//!     sort: SortState::default(),
//! };
//!
//! let mut pipeline = Pipeline::default();
//! pipeline.run(&inputs);
//! let output = pipeline.output(&records, 1);
//! assert_eq!(output.total_records, 1);
//! assert_eq!(output.rows[0].id, "2");
//! ```

pub mod collate;
pub mod counts;
pub mod paginate;
pub mod search;
pub mod sort;

pub use collate::Collator;
pub use counts::{value_counts, ValueCount};
pub use paginate::{paginate, total_pages, Page, Pagination, PAGE_SIZE};
pub use search::{apply_search, SearchQuery};
pub use sort::{apply_sort, SortDirection, SortState};

use crate::domain::Record;
use crate::filter::FilterState;

/// Base record set the pipeline starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole snapshot.
    #[default]
    All,
    /// Records whose cohort id equals the given one.
    Cohort(String),
    /// Nothing; used before a cohort has been chosen.
    Empty,
}

impl Scope {
    #[must_use]
    pub fn admits(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Cohort(id) => record.cycle_id.as_deref() == Some(id.as_str()),
            Self::Empty => false,
        }
    }
}

/// Everything a pipeline run reads.
///
/// The generations stand in for the snapshot and filter state in the memo key;
/// callers bump them whenever those change.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInputs<'a> {
    pub records: &'a [Record],
    pub snapshot_generation: u64,
    pub scope: &'a Scope,
    pub filters: &'a FilterState,
    pub filter_generation: u64,
    pub query: &'a SearchQuery,
    pub sort: SortState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectionKey {
    snapshot_generation: u64,
    scope: Scope,
    filter_generation: u64,
    query: SearchQuery,
}

impl SelectionKey {
    fn of(inputs: &PipelineInputs<'_>) -> Self {
        Self {
            snapshot_generation: inputs.snapshot_generation,
            scope: inputs.scope.clone(),
            filter_generation: inputs.filter_generation,
            query: inputs.query.clone(),
        }
    }
}

/// Memoized pipeline over one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    collator: Collator,
    selection: Option<(SelectionKey, Vec<usize>)>,
    ordered: Option<SortState>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl Pipeline {
    #[must_use]
    pub fn new(collator: Collator) -> Self {
        Self {
            collator,
            ..Self::default()
        }
    }

    /// Brings the cached result up to date with `inputs` and returns it.
    pub fn run(&mut self, inputs: &PipelineInputs<'_>) -> &[usize] {
        let key = SelectionKey::of(inputs);

        let selection_fresh = self.selection.as_ref().is_some_and(|(cached, _)| *cached == key);
        if !selection_fresh {
            let selected = select(inputs);
            self.selection = Some((key, selected));
            self.ordered = None;
            self.recomputations += 1;
        }

        if self.ordered != Some(inputs.sort) {
            let selected = self.selection.as_ref().map_or(&[][..], |(_, s)| s.as_slice());
            self.indices = order(inputs.records, selected, &inputs.sort, &self.collator);
            self.ordered = Some(inputs.sort);
        } else {
            tracing::trace!("pipeline cache hit");
        }

        &self.indices
    }

    /// Ordered indices from the last run.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of times the filter and search stages actually ran.
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Ordered records from the last run.
    pub fn records<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Renders the requested page of the last run.
    #[must_use]
    pub fn output<'a>(&self, records: &'a [Record], requested_page: usize) -> PipelineOutput<'a> {
        let page = paginate(&self.indices, requested_page);
        PipelineOutput {
            rows: page.items.iter().filter_map(|&i| records.get(i)).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_records: page.total_items,
        }
    }
}

/// One rendered page plus the totals the view displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput<'a> {
    pub rows: Vec<&'a Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

fn select(inputs: &PipelineInputs<'_>) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "pipeline_select",
        records = inputs.records.len(),
        mode = inputs.filters.mode_name(),
        query_len = inputs.query.as_str().len()
    )
    .entered();

    let selected: Vec<usize> = inputs
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| inputs.scope.admits(r))
        .filter(|(_, r)| inputs.filters.matches(r))
        .filter(|(_, r)| inputs.query.matches(r))
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(selected = selected.len(), "selection recomputed");
    selected
}

fn order(records: &[Record], selected: &[usize], sort: &SortState, collator: &Collator) -> Vec<usize> {
    let mut ordered = selected.to_vec();
    if sort.is_active() {
        let _span = tracing::debug_span!("pipeline_sort", key = ?sort.key, count = ordered.len()).entered();
        ordered.sort_by(|&a, &b| sort.compare(&records[a], &records[b], collator));
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;

    fn snapshot(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                school: (if i % 2 == 0 { "Alon" } else { "Ort" }).to_string(),
                ..Record::new(format!("r{i:03}"), format!("child {i:03}"))
            })
            .collect()
    }

    fn inputs<'a>(
        records: &'a [Record],
        filters: &'a FilterState,
        query: &'a SearchQuery,
        sort: SortState,
    ) -> PipelineInputs<'a> {
        PipelineInputs {
            records,
            snapshot_generation: 1,
            scope: &Scope::All,
            filters,
            filter_generation: 1,
            query,
            sort,
        }
    }

    #[test]
    fn identical_inputs_hit_the_cache() {
        let records = snapshot(10);
        let filters = FilterState::default();
        let query = SearchQuery::default();
        let mut pipeline = Pipeline::default();

        pipeline.run(&inputs(&records, &filters, &query, SortState::default()));
        pipeline.run(&inputs(&records, &filters, &query, SortState::default()));
        assert_eq!(pipeline.recomputations(), 1);
    }

    #[test]
    fn sort_change_reuses_selection() {
        let records = snapshot(10);
        let filters = FilterState::default();
        let query = SearchQuery::default();
        let mut pipeline = Pipeline::default();

        pipeline.run(&inputs(&records, &filters, &query, SortState::default()));
        let sorted = SortState::by(Field::ChildName, SortDirection::Desc);
        let ordered = pipeline.run(&inputs(&records, &filters, &query, sorted)).to_vec();

        assert_eq!(pipeline.recomputations(), 1);
        assert_eq!(ordered.first(), Some(&9));
    }

    #[test]
    fn query_change_recomputes() {
        let records = snapshot(10);
        let filters = FilterState::default();
        let mut pipeline = Pipeline::default();

        pipeline.run(&inputs(&records, &filters, &SearchQuery::default(), SortState::default()));
        let query = SearchQuery::new("ORT");
        let selected = pipeline.run(&inputs(&records, &filters, &query, SortState::default())).len();

        assert_eq!(pipeline.recomputations(), 2);
        assert_eq!(selected, 5);
    }

    #[test]
    fn cohort_scope_restricts_base_set() {
        let mut records = snapshot(4);
        records[1].cycle_id = Some("c1".into());
        records[3].cycle_id = Some("c1".into());
        let filters = FilterState::default();
        let query = SearchQuery::default();
        let scope = Scope::Cohort("c1".into());

        let mut pipeline = Pipeline::default();
        let run = PipelineInputs {
            scope: &scope,
            ..inputs(&records, &filters, &query, SortState::default())
        };
        assert_eq!(pipeline.run(&run), [1, 3]);

        let empty = PipelineInputs {
            scope: &Scope::Empty,
            ..run
        };
        assert!(pipeline.run(&empty).is_empty());
    }

    #[test]
    fn output_pages_through_ordered_rows() {
        let records = snapshot(120);
        let filters = FilterState::default();
        let query = SearchQuery::default();
        let mut pipeline = Pipeline::default();
        pipeline.run(&inputs(&records, &filters, &query, SortState::default()));

        let last = pipeline.output(&records, 4);
        assert_eq!(last.page, 3);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.rows.len(), 20);
        assert_eq!(last.rows[0].id, "r100");
    }
}
