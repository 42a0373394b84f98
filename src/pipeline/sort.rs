//! Single-key sort stage with a tri-state header cycle.

use super::collate::Collator;
use crate::domain::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort column and direction. A `None` key keeps the filtered order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<Field>,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn by(field: Field, direction: SortDirection) -> Self {
        Self {
            key: Some(field),
            direction,
        }
    }

    /// Applies one click on a column header.
    ///
    /// A new column sorts ascending, the same column flips to descending, and a
    /// third click clears the sort and resets the direction to ascending.
    pub fn click(&mut self, field: Field) {
        *self = match (self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == field => Self::by(field, SortDirection::Desc),
            (Some(current), SortDirection::Desc) if current == field => Self::default(),
            _ => Self::by(field, SortDirection::Asc),
        };
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Compares two records under this state; `Equal` when no key is set.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record, collator: &Collator) -> Ordering {
        let Some(field) = self.key else {
            return Ordering::Equal;
        };
        let ordering = match (a.value(field), b.value(field)) {
            (FieldValue::Flag(x), FieldValue::Flag(y)) => x.cmp(&y),
            (x, y) => collator.compare(x.as_text(), y.as_text()),
        };
        self.direction.apply(ordering)
    }
}

/// Orders records by `state`. Equal keys keep their relative input order.
pub fn apply_sort<'a>(mut records: Vec<&'a Record>, state: &SortState, collator: &Collator) -> Vec<&'a Record> {
    if !state.is_active() {
        return records;
    }

    let _span = tracing::debug_span!(
        "apply_sort",
        key = ?state.key,
        direction = ?state.direction,
        count = records.len()
    )
    .entered();

    records.sort_by(|a, b| state.compare(a, b, collator));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record {
                needs_pickup: true,
                ..Record::new("1", "תמר")
            },
            Record::new("2", "אורי"),
            Record {
                needs_pickup: true,
                ..Record::new("3", "נועה")
            },
            Record::new("4", "דניאל"),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn click_cycles_through_three_states() {
        let mut state = SortState::default();

        state.click(Field::ChildName);
        assert_eq!(state, SortState::by(Field::ChildName, SortDirection::Asc));

        state.click(Field::ChildName);
        assert_eq!(state, SortState::by(Field::ChildName, SortDirection::Desc));

        state.click(Field::ChildName);
        assert_eq!(state, SortState::default());
    }

    #[test]
    fn clicking_another_column_restarts_ascending() {
        let mut state = SortState::by(Field::ChildName, SortDirection::Desc);
        state.click(Field::School);
        assert_eq!(state, SortState::by(Field::School, SortDirection::Asc));
    }

    #[test]
    fn three_clicks_restore_input_order() {
        let records = records();
        let collator = Collator::default();
        let original: Vec<&Record> = records.iter().collect();

        let mut state = SortState::default();
        for _ in 0..3 {
            state.click(Field::ChildName);
        }
        assert_eq!(apply_sort(original.clone(), &state, &collator), original);
    }

    #[test]
    fn strings_use_collation() {
        let records = records();
        let collator = Collator::default();

        let asc = apply_sort(records.iter().collect(), &SortState::by(Field::ChildName, SortDirection::Asc), &collator);
        assert_eq!(ids(&asc), ["2", "4", "3", "1"]);

        let desc = apply_sort(records.iter().collect(), &SortState::by(Field::ChildName, SortDirection::Desc), &collator);
        assert_eq!(ids(&desc), ["1", "3", "4", "2"]);
    }

    #[test]
    fn booleans_order_false_first_and_keep_ties_stable() {
        let records = records();
        let collator = Collator::default();

        let asc = apply_sort(records.iter().collect(), &SortState::by(Field::NeedsPickup, SortDirection::Asc), &collator);
        assert_eq!(ids(&asc), ["2", "4", "1", "3"]);

        let desc = apply_sort(records.iter().collect(), &SortState::by(Field::NeedsPickup, SortDirection::Desc), &collator);
        assert_eq!(ids(&desc), ["1", "3", "2", "4"]);
    }

    #[test]
    fn absent_values_sort_as_empty_strings() {
        let mut with_cycle = Record::new("a", "x");
        with_cycle.cycle_id = Some("c1".into());
        let without = Record::new("b", "y");
        let collator = Collator::default();

        let state = SortState::by(Field::CycleId, SortDirection::Asc);
        assert_eq!(state.compare(&without, &with_cycle, &collator), Ordering::Less);
    }
}
