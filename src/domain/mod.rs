//! Domain layer for regdesk.
//!
//! This module contains the core domain types, independent of storage formats,
//! rendering or the command-line surface.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Registration record, addressable fields and value coercion
//! - [`attendance`]: Per-cohort daily arrival marks
//! - [`catalog`]: Known fields and bounded value domains
//!
//! # Examples
//!
//! ```
//! use regdesk::domain::{Field, Record};
//!
//! let mut record = Record::new("rec1", "Dana");
//! record.school = "Alon".to_string();
//! assert_eq!(record.value(Field::School).as_text(), "Alon");
//! ```

pub mod attendance;
pub mod catalog;
pub mod error;
pub mod record;

pub use attendance::{AttendanceSheet, AttendanceUpdate};
pub use catalog::FieldCatalog;
pub use error::{RegdeskError, Result};
pub use record::{Field, FieldValue, Record};
