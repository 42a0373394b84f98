//! Multi-select advanced filters.
//!
//! Used when advanced mode is on but no condition group has been defined. Each
//! field carries a set of accepted values (OR within the field); each boolean
//! column carries an optional required value. The active constraints are
//! combined with the structure's own operator.

use super::group::BoolOp;
use crate::domain::{Field, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilters {
    /// Accepted values per field. An empty list imposes no constraint.
    #[serde(default)]
    pub values: BTreeMap<Field, Vec<String>>,
    #[serde(default)]
    pub needs_pickup: Option<bool>,
    #[serde(default)]
    pub in_whatsapp_group: Option<bool>,
    #[serde(default)]
    pub operator: BoolOp,
}

impl AdvancedFilters {
    /// Adds the value to the field's accepted set, or removes it if present.
    pub fn toggle_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let accepted = self.values.entry(field).or_default();
        if let Some(pos) = accepted.iter().position(|v| *v == value) {
            accepted.remove(pos);
        } else {
            accepted.push(value);
        }
        if accepted.is_empty() {
            self.values.remove(&field);
        }
    }

    /// Sets the required value of a boolean column; `None` clears it.
    ///
    /// Non-boolean fields are ignored.
    pub fn set_flag(&mut self, field: Field, value: Option<bool>) {
        match field {
            Field::NeedsPickup => self.needs_pickup = value,
            Field::InWhatsappGroup => self.in_whatsapp_group = value,
            _ => tracing::debug!(field = %field, "ignoring flag filter on non-boolean field"),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
            || self.needs_pickup.is_some()
            || self.in_whatsapp_group.is_some()
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let set_checks = self
            .values
            .iter()
            .filter(|(_, accepted)| !accepted.is_empty())
            .map(|(field, accepted)| {
                let actual = record.value(*field).as_text();
                accepted.iter().any(|v| *v == actual)
            });

        let flag_checks = [
            self.needs_pickup.map(|want| record.needs_pickup == want),
            self.in_whatsapp_group
                .map(|want| record.in_whatsapp_group == want),
        ]
        .into_iter()
        .flatten();

        let checks: Vec<bool> = set_checks.chain(flag_checks).collect();
        if checks.is_empty() {
            return true;
        }
        self.operator.combine(checks)
    }
}
