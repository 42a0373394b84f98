//! Filterable-field metadata supplied alongside a snapshot.

use super::record::{Field, Record};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Known field keys and the value domain of each bounded field.
///
/// The multi-select filters offer exactly these values, and badge counts are
/// computed per value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub fields: Vec<Field>,
    pub values: BTreeMap<Field, Vec<String>>,
}

impl FieldCatalog {
    /// Derives the catalog from the records themselves.
    ///
    /// Bounded fields list their distinct non-blank values in sorted order.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let values = Field::BOUNDED
            .into_iter()
            .map(|field| {
                let distinct: BTreeSet<&str> = records
                    .iter()
                    .map(|r| r.value(field).as_text())
                    .filter(|v| !v.trim().is_empty())
                    .collect();
                (field, distinct.into_iter().map(str::to_string).collect())
            })
            .collect();

        Self {
            fields: Field::ALL.to_vec(),
            values,
        }
    }

    /// Value domain of a bounded field; empty for unbounded ones.
    #[must_use]
    pub fn values(&self, field: Field) -> &[String] {
        self.values.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn knows(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_distinct_sorted_values() {
        let records = vec![
            Record {
                school: "Ort".into(),
                ..Record::new("1", "a")
            },
            Record {
                school: "Alon".into(),
                ..Record::new("2", "b")
            },
            Record {
                school: "Ort".into(),
                ..Record::new("3", "c")
            },
            Record::new("4", "d"),
        ];

        let catalog = FieldCatalog::from_records(&records);
        assert_eq!(catalog.values(Field::School), ["Alon", "Ort"]);
        assert!(catalog.values(Field::ChildName).is_empty());
        assert!(catalog.knows("parentPhone"));
        assert!(!catalog.knows("nickname"));
    }
}
