//! Condition groups and boolean combination.

use super::condition::Condition;
use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// Boolean combination operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolOp {
    #[default]
    And,
    Or,
}

impl BoolOp {
    /// Folds a sequence of results.
    ///
    /// AND over nothing is `true`, OR over nothing is `false`.
    pub fn combine<I>(self, results: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut results = results.into_iter();
        match self {
            Self::And => results.all(|r| r),
            Self::Or => results.any(|r| r),
        }
    }
}

/// Conditions joined by a single operator.
///
/// Condition order is display order only; both operators are commutative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub operator: BoolOp,
}

impl ConditionGroup {
    pub fn new(id: impl Into<String>, operator: BoolOp) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            operator,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.operator
            .combine(self.conditions.iter().map(|c| c.matches(record)))
    }

    /// Removes a condition by id, returning whether one was removed.
    pub fn remove_condition(&mut self, condition_id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.id != condition_id);
        self.conditions.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::condition::Operator;

    fn record() -> Record {
        Record {
            course: "Robotics".into(),
            school: "Alon".into(),
            ..Record::new("r1", "Dana")
        }
    }

    fn equals(id: &str, field: &str, value: &str) -> Condition {
        Condition::new(id, field, Operator::Equals, Some(value.into()))
    }

    #[test]
    fn empty_groups_are_vacuous() {
        assert!(ConditionGroup::new("g", BoolOp::And).matches(&record()));
        assert!(!ConditionGroup::new("g", BoolOp::Or).matches(&record()));
    }

    #[test]
    fn and_requires_every_condition() {
        let group = ConditionGroup::new("g", BoolOp::And)
            .with_condition(equals("a", "course", "Robotics"))
            .with_condition(equals("b", "school", "Ort"));
        assert!(!group.matches(&record()));
    }

    #[test]
    fn or_requires_any_condition() {
        let group = ConditionGroup::new("g", BoolOp::Or)
            .with_condition(equals("a", "course", "Chess"))
            .with_condition(equals("b", "school", "Alon"));
        assert!(group.matches(&record()));
    }

    #[test]
    fn remove_condition_by_id() {
        let mut group = ConditionGroup::new("g", BoolOp::And)
            .with_condition(equals("a", "course", "Chess"));
        assert!(group.remove_condition("a"));
        assert!(!group.remove_condition("a"));
        assert!(group.conditions.is_empty());
    }

    #[test]
    fn operator_serializes_uppercase() {
        assert_eq!(serde_json::to_value(BoolOp::Or).unwrap(), "OR");
        let op: BoolOp = serde_json::from_str("\"AND\"").unwrap();
        assert_eq!(op, BoolOp::And);
    }
}
