//! Runtime that executes handler actions.
//!
//! The application layer never performs I/O. This layer takes the
//! [`Action`](crate::app::Action)s it returns, runs them against a
//! [`RegistrationSource`](crate::storage::RegistrationSource), and feeds the
//! results back as events:
//!
//! ```text
//! Event → handle_event → Actions → Executor → RegistrationSource
//!   ↑                                              │
//!   └──────────── SnapshotLoaded / AttendanceLoaded ┘
//! ```

pub mod executor;

pub use executor::{Executor, OutgoingMessage};
