//! Single field/operator/value predicates.
//!
//! A [`Condition`] is the leaf of the composable filter tree. Conditions are
//! addressed by wire key rather than by [`Field`](crate::domain::Field) so that a
//! condition referencing a column the snapshot does not have still evaluates
//! (against an absent value) instead of failing to load.

use crate::domain::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a condition.
///
/// Serialized as its snake_case name. Any other string deserializes to
/// [`Operator::Unknown`], which keeps the original text and matches every record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Case-insensitive substring test.
    Contains,
    /// Case-sensitive string equality.
    Equals,
    /// Case-sensitive string inequality.
    NotEquals,
    IsEmpty,
    IsNotEmpty,
    /// Unrecognized operator name, evaluated permissively.
    Unknown(String),
}

impl Operator {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "contains" => Self::Contains,
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "is_empty" => Self::IsEmpty,
            "is_not_empty" => Self::IsNotEmpty,
            _ => Self::Unknown(name),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Flag(bool),
    Text(String),
}

impl ConditionValue {
    fn as_text(&self) -> &str {
        match self {
            Self::Flag(true) => "true",
            Self::Flag(false) => "false",
            Self::Text(s) => s,
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// A single predicate over a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    /// Wire key of the target field (e.g. `"school"`, `"needsPickup"`).
    pub field: String,
    pub operator: Operator,
    /// `None` only makes sense for the emptiness operators; elsewhere it
    /// compares as the empty string.
    #[serde(default)]
    pub value: Option<ConditionValue>,
}

impl Condition {
    pub fn new(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: Option<ConditionValue>,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator,
            value,
        }
    }

    /// Evaluates the condition against a record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        evaluate(record.value_by_key(&self.field), &self.operator, self.value.as_ref())
    }
}

/// Evaluates one operator against an already-read field value.
///
/// Never fails: missing values and misconfigured conditions fall back to the
/// coercion rules instead of raising.
#[must_use]
pub fn evaluate(field: FieldValue<'_>, operator: &Operator, value: Option<&ConditionValue>) -> bool {
    let expected = value.map_or("", ConditionValue::as_text);

    match operator {
        Operator::Contains => field
            .as_text()
            .to_lowercase()
            .contains(&expected.to_lowercase()),
        Operator::Equals => field.as_text() == expected,
        Operator::NotEquals => field.as_text() != expected,
        Operator::IsEmpty => is_empty(field),
        Operator::IsNotEmpty => is_not_empty(field),
        Operator::Unknown(name) => {
            tracing::debug!(operator = %name, "unknown filter operator, admitting record");
            true
        }
    }
}

/// Falsy, or blank once trimmed.
#[must_use]
pub fn is_empty(field: FieldValue<'_>) -> bool {
    !field.is_truthy() || field.as_text().trim().is_empty()
}

/// Truthy and non-blank once trimmed.
#[must_use]
pub fn is_not_empty(field: FieldValue<'_>) -> bool {
    field.is_truthy() && !field.as_text().trim().is_empty()
}
