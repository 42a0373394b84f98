//! File-based structured logging.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → <data dir>/regdesk.log
//! ```
//!
//! # Features
//!
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//! - **Spans**: every pipeline stage and event runs inside a debug span
//!
//! # Configuration
//!
//! The filter is chosen from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, resolve_filter, LOG_FILE_NAME};
