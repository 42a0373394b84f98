//! Storage layer for registration snapshots and attendance.
//!
//! # Modules
//!
//! - `backend`: [`RegistrationSource`] trait over registration stores
//! - `json`: JSON file store with atomic writes
//! - `models`: snapshot, session context and persisted attendance types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::RegistrationSource;
pub use json::JsonStore;
pub use models::{ensure_unique_ids, AttendanceRecord, SessionContext, Snapshot};
