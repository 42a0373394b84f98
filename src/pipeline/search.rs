//! Free-text search stage.
//!
//! The query is trimmed and lower-cased once. Text columns are lower-cased
//! before the substring test; phone numbers and trial dates are matched as-is
//! since they are numeric or ISO strings.

use crate::domain::{Field, Record};

/// Columns the search box looks at, with whether each is case folded.
pub const SEARCH_FIELDS: [(Field, bool); 9] = [
    (Field::ChildName, true),
    (Field::ParentName, true),
    (Field::ParentPhone, false),
    (Field::School, true),
    (Field::Course, true),
    (Field::ClassName, true),
    (Field::Cycle, true),
    (Field::TrialDate, false),
    (Field::Status, true),
];

/// A normalized search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// Whether the query is blank and passes everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_empty() {
            return true;
        }
        SEARCH_FIELDS.iter().any(|&(field, fold)| {
            let text = record.value(field).as_text();
            if fold {
                text.to_lowercase().contains(&self.needle)
            } else {
                text.contains(&self.needle)
            }
        })
    }
}

/// Keeps the records matching `query`, in input order.
pub fn apply_search<'a, I>(records: I, query: &SearchQuery) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let _span = tracing::debug_span!("apply_search", query_len = query.as_str().len()).entered();

    let kept: Vec<&Record> = records
        .into_iter()
        .filter(|record| query.matches(record))
        .collect();

    tracing::debug!(kept = kept.len(), "search applied");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record {
                parent_phone: "0501234567".into(),
                school: "Alon".into(),
                ..Record::new("1", "Dana")
            },
            Record {
                parent_phone: "0529876543".into(),
                course: "Robotics".into(),
                ..Record::new("2", "Noa")
            },
            Record {
                parent_name: "Yossi Cohen".into(),
                trial_date: "2024-05-12".into(),
                ..Record::new("3", "Ido")
            },
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn blank_query_is_a_pass_through() {
        let records = records();
        assert_eq!(apply_search(&records, &SearchQuery::new("   ")).len(), 3);
    }

    #[test]
    fn phone_prefix_matches() {
        let records = records();
        let kept = apply_search(&records, &SearchQuery::new("050"));
        assert_eq!(ids(&kept), ["1"]);
    }

    #[test]
    fn text_fields_are_case_insensitive() {
        let records = records();
        assert_eq!(ids(&apply_search(&records, &SearchQuery::new(" ROBO "))), ["2"]);
        assert_eq!(ids(&apply_search(&records, &SearchQuery::new("cohen"))), ["3"]);
    }

    #[test]
    fn dates_are_searchable() {
        let records = records();
        assert_eq!(ids(&apply_search(&records, &SearchQuery::new("2024-05"))), ["3"]);
    }

    #[test]
    fn id_is_not_searched() {
        let records = vec![Record::new("needle", "Dana")];
        assert!(apply_search(&records, &SearchQuery::new("needle")).is_empty());
    }
}
