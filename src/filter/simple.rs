//! Legacy single-select filters.
//!
//! One optional value per field, compared by exact string equality against the
//! field's coerced form. All set values are AND-ed.

use crate::domain::{Field, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleFilters {
    #[serde(default)]
    pub values: BTreeMap<Field, String>,
}

impl SimpleFilters {
    /// Sets a field's required value; an empty value clears the constraint.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.values
            .iter()
            .filter(|(_, expected)| !expected.is_empty())
            .all(|(field, expected)| record.value(*field).as_text() == expected.as_str())
    }
}
