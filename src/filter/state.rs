//! Filter state and mode selection.
//!
//! The dashboard has three mutually exclusive ways of filtering, but the
//! filters of each mode live side by side and survive while their mode is
//! inactive. The advanced-mode flag and the group list pick which one is
//! evaluated:
//!
//! ```text
//! advanced off                 → Simple    (simple filters)
//! advanced on, no groups       → Advanced  (advanced filters)
//! advanced on, ≥ 1 group       → Grouped   (groups joined by the group operator)
//! ```
//!
//! Turning advanced mode off and on again brings back the groups and the
//! advanced filters as they were; the simple filters are kept the same way.
//! Removing the last group falls back to the advanced filters unchanged.

use super::advanced::AdvancedFilters;
use super::condition::Condition;
use super::group::{BoolOp, ConditionGroup};
use super::simple::SimpleFilters;
use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// Filtering mode in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Simple,
    Advanced,
    Grouped,
}

impl FilterMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Advanced => "advanced",
            Self::Grouped => "grouped",
        }
    }
}

/// Complete filter configuration evaluated against the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub advanced_mode: bool,
    pub simple: SimpleFilters,
    /// Evaluated in advanced mode while no group exists.
    pub advanced: AdvancedFilters,
    pub groups: Vec<ConditionGroup>,
    /// Operator applied between groups.
    pub group_operator: BoolOp,
}

impl FilterState {
    #[must_use]
    pub fn mode(&self) -> FilterMode {
        match (self.advanced_mode, self.groups.is_empty()) {
            (false, _) => FilterMode::Simple,
            (true, true) => FilterMode::Advanced,
            (true, false) => FilterMode::Grouped,
        }
    }

    /// Short name of the active mode, for logs and headers.
    #[must_use]
    pub fn mode_name(&self) -> &'static str {
        self.mode().name()
    }

    /// Whether any constraint can exclude a record.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self.mode() {
            FilterMode::Simple => self.simple.is_active(),
            FilterMode::Advanced => self.advanced.is_active(),
            FilterMode::Grouped => true,
        }
    }

    /// Evaluates the active mode against one record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self.mode() {
            FilterMode::Simple => self.simple.matches(record),
            FilterMode::Advanced => self.advanced.matches(record),
            FilterMode::Grouped => self
                .group_operator
                .combine(self.groups.iter().map(|g| g.matches(record))),
        }
    }

    /// Turns advanced mode on or off. The filters of the other mode are kept.
    pub fn set_advanced(&mut self, on: bool) {
        self.advanced_mode = on;
    }

    /// Empties every mode's filters, keeping the advanced-mode flag.
    pub fn clear(&mut self) {
        *self = Self {
            advanced_mode: self.advanced_mode,
            ..Self::default()
        };
    }

    /// Simple filters, if simple mode is active.
    pub fn simple_mut(&mut self) -> Option<&mut SimpleFilters> {
        (!self.advanced_mode).then_some(&mut self.simple)
    }

    /// Advanced filters, if advanced mode is on.
    ///
    /// In grouped mode editing them does not affect results until the last
    /// group is removed.
    pub fn advanced_mut(&mut self) -> Option<&mut AdvancedFilters> {
        self.advanced_mode.then_some(&mut self.advanced)
    }

    #[must_use]
    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }

    /// Appends a group, returning whether it was added.
    ///
    /// Groups only exist in advanced mode; in simple mode the call is ignored.
    pub fn add_group(&mut self, group: ConditionGroup) -> bool {
        if !self.advanced_mode {
            tracing::debug!(group_id = %group.id, "condition group ignored in simple mode");
            return false;
        }
        self.groups.push(group);
        true
    }

    /// Removes a group by id, returning whether one was removed.
    pub fn remove_group(&mut self, group_id: &str) -> bool {
        if !self.advanced_mode {
            return false;
        }
        let before = self.groups.len();
        self.groups.retain(|g| g.id != group_id);
        self.groups.len() != before
    }

    pub fn group_mut(&mut self, group_id: &str) -> Option<&mut ConditionGroup> {
        if !self.advanced_mode {
            return None;
        }
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    /// Appends a condition to an existing group.
    pub fn add_condition(&mut self, group_id: &str, condition: Condition) -> bool {
        self.group_mut(group_id).map_or(false, |group| {
            group.conditions.push(condition);
            true
        })
    }

    /// Sets the operator applied between groups, returning whether advanced
    /// mode accepted it.
    pub fn set_group_operator(&mut self, operator: BoolOp) -> bool {
        if self.advanced_mode {
            self.group_operator = operator;
        }
        self.advanced_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;
    use crate::filter::condition::Operator;

    fn group(id: &str) -> ConditionGroup {
        ConditionGroup::new(id, BoolOp::And).with_condition(Condition::new(
            format!("{id}-c"),
            "school",
            Operator::Equals,
            Some("Alon".into()),
        ))
    }

    fn advanced() -> FilterState {
        let mut state = FilterState::default();
        state.set_advanced(true);
        state
    }

    #[test]
    fn default_is_simple_and_inactive() {
        let state = FilterState::default();
        assert_eq!(state.mode(), FilterMode::Simple);
        assert!(!state.is_active());
    }

    #[test]
    fn removing_last_group_falls_back_to_advanced_filters() {
        let mut state = advanced();
        state
            .advanced_mut()
            .unwrap()
            .toggle_value(Field::Course, "Chess");

        assert!(state.add_group(group("g1")));
        assert_eq!(state.mode(), FilterMode::Grouped);

        assert!(state.remove_group("g1"));
        assert_eq!(state.mode(), FilterMode::Advanced);
        assert_eq!(state.advanced.values[&Field::Course], vec!["Chess".to_string()]);
    }

    #[test]
    fn removing_one_of_two_groups_stays_grouped() {
        let mut state = advanced();
        state.add_group(group("g1"));
        state.add_group(group("g2"));

        assert!(state.remove_group("g1"));
        assert_eq!(state.groups().len(), 1);
        assert!(!state.remove_group("missing"));
        assert_eq!(state.mode(), FilterMode::Grouped);
    }

    #[test]
    fn toggling_advanced_mode_keeps_every_payload() {
        let mut state = FilterState::default();
        state.simple_mut().unwrap().set(Field::School, "Ort");

        state.set_advanced(true);
        state.advanced_mut().unwrap().needs_pickup = Some(true);
        state.add_group(group("g1"));
        state.set_group_operator(BoolOp::Or);

        state.set_advanced(false);
        assert_eq!(state.mode(), FilterMode::Simple);
        assert_eq!(state.simple.get(Field::School), Some("Ort"));

        state.set_advanced(true);
        assert_eq!(state.mode(), FilterMode::Grouped);
        assert_eq!(state.groups().len(), 1);
        assert_eq!(state.group_operator, BoolOp::Or);
        assert_eq!(state.advanced.needs_pickup, Some(true));
    }

    #[test]
    fn group_edits_are_ignored_in_simple_mode() {
        let mut state = FilterState::default();
        assert!(!state.add_group(group("g1")));
        assert!(!state.set_group_operator(BoolOp::Or));
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn clear_keeps_only_the_mode_flag() {
        let mut state = advanced();
        state.add_group(group("g1"));
        state.clear();
        assert_eq!(state, advanced());
        assert_eq!(state.mode(), FilterMode::Advanced);
    }

    #[test]
    fn grouped_state_deserializes_with_defaults() {
        let json = r#"{"advancedMode":true,"groups":[],"groupOperator":"OR","advanced":{"needsPickup":true}}"#;
        let state: FilterState = serde_json::from_str(json).unwrap();

        assert_eq!(state.mode(), FilterMode::Advanced);
        assert_eq!(state.advanced.needs_pickup, Some(true));
        assert_eq!(state.group_operator, BoolOp::Or);
        assert!(!state.simple.is_active());
    }

    #[test]
    fn add_condition_targets_group_by_id() {
        let mut state = advanced();
        state.add_group(group("g1"));

        let extra = Condition::new("x", "course", Operator::IsNotEmpty, None);
        assert!(state.add_condition("g1", extra.clone()));
        assert!(!state.add_condition("g2", extra));
        assert_eq!(state.groups()[0].conditions.len(), 2);
    }
}
