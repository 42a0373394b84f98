//! Per-value counts for active filter badges.
//!
//! A read-only query over the filtered set: each count re-filters the records
//! with one extra equality predicate on the chosen field.

use crate::domain::{Field, Record};
use crate::filter::condition::{evaluate, ConditionValue, Operator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts how many of `records` have each of `values` in `field`.
///
/// Values are reported in the order given, including zero counts.
#[must_use]
pub fn value_counts(records: &[&Record], field: Field, values: &[String]) -> Vec<ValueCount> {
    let _span = tracing::debug_span!("value_counts", field = %field, values = values.len()).entered();

    values
        .iter()
        .map(|value| {
            let expected = ConditionValue::Text(value.clone());
            let count = records
                .iter()
                .filter(|r| evaluate(r.value(field), &Operator::Equals, Some(&expected)))
                .count();
            ValueCount {
                value: value.clone(),
                count,
            }
        })
        .collect()
}
