//! Filter engine entry point.

use super::state::FilterState;
use crate::domain::Record;

/// Returns the records admitted by `state`, in input order.
///
/// Evaluation is per record, so a malformed record never affects the others.
/// Applying the same state to the output again yields the same output.
///
/// # Examples
///
/// ```
/// use regdesk::domain::{Field, Record};
/// use regdesk::filter::{apply_filters, FilterState};
///
/// let mut a = Record::new("1", "Dana");
/// a.school = "A".into();
/// let mut b = Record::new("2", "Noa");
/// b.school = "B".into();
/// let records = vec![a, b];
///
/// let mut state = FilterState::default();
/// state.simple_mut().unwrap().set(Field::School, "A");
///
/// let kept = apply_filters(&records, &state);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, "1");
/// ```
pub fn apply_filters<'a, I>(records: I, state: &FilterState) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let _span = tracing::debug_span!("apply_filters", mode = state.mode_name()).entered();

    let kept: Vec<&Record> = records
        .into_iter()
        .filter(|record| state.matches(record))
        .collect();

    tracing::debug!(kept = kept.len(), "filters applied");
    kept
}
