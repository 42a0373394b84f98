//! Error types for regdesk.
//!
//! This module defines the centralized error type [`RegdeskError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The filter, search, sort and pagination stages never produce errors. Only the
//! collaborators around them (snapshot loading, attendance storage, configuration,
//! theming) can fail.

use thiserror::Error;

/// The main error type for regdesk operations.
///
/// # Examples
///
/// ```
/// use regdesk::RegdeskError;
///
/// fn validate_config() -> Result<(), RegdeskError> {
///     Err(RegdeskError::Config("store_path must not be empty".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum RegdeskError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the registration store fails for a
    /// reason other than raw I/O (missing cohort, duplicate record id, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record snapshot could not be fetched.
    ///
    /// Surfaced to the view as a terminal load failure; the user recovers with a
    /// manual refresh.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// No usable session was supplied to a store operation.
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for regdesk operations.
pub type Result<T> = std::result::Result<T, RegdeskError>;
