//! Composable record filter engine.
//!
//! # Architecture
//!
//! ```text
//! FilterState ─┬─ SimpleFilters      exact match per field, AND
//!              ├─ AdvancedFilters    set membership per field, AND/OR
//!              └─ groups             joined by the group operator, AND/OR
//!                   └─ ConditionGroup  conditions joined by AND/OR
//!                        └─ Condition  field / operator / value
//! ```
//!
//! The advanced-mode flag and the group list select which one is evaluated
//! ([`FilterMode`]); the others are kept as they are.
//!
//! Every evaluator is a pure predicate over one [`Record`](crate::domain::Record).
//! [`apply_filters`] runs the active mode over a record sequence and keeps the
//! input order.

pub mod advanced;
pub mod condition;
pub mod engine;
pub mod group;
pub mod simple;
pub mod state;

pub use advanced::AdvancedFilters;
pub use condition::{Condition, ConditionValue, Operator};
pub use engine::apply_filters;
pub use group::{BoolOp, ConditionGroup};
pub use simple::SimpleFilters;
pub use state::{FilterMode, FilterState};
