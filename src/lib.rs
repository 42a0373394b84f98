//! Regdesk: the core of a registration dashboard for after-school programs.
//!
//! Regdesk turns a flat snapshot of enrollment records into the page an
//! office operator looks at:
//! - Composable filtering in simple, advanced and condition-group modes
//! - Free-text search across the visible columns
//! - Tri-state column sorting with Hebrew-aware collation
//! - Fixed 50-row pagination
//! - An arrivals view with per-day attendance marks
//! - Bulk messaging to the parents of the current result

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI runtime (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Pipeline      │   │ Storage Layer │
//! │ (ui/)         │   │ (pipeline/)   │   │ (storage/)    │
//! │ - Rendering   │   │ - Search      │   │ - JSON I/O    │
//! │ - Theming     │   │ - Sort        │   │ - Attendance  │
//! │ - Components  │   │ - Paginate    │   │ - Source API  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Filter engine (filter/) and domain types (domain/) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: application state machine with event/action model
//! - [`domain`]: records, fields, attendance and errors
//! - [`filter`]: condition evaluation and the three filter modes
//! - [`pipeline`]: search, sort, pagination and memoized recomputation
//! - [`runtime`]: executes handler actions against a registration source
//! - [`storage`]: registration sources and the JSON file store
//! - [`ui`]: terminal rendering with theme support
//! - [`infrastructure`]: data directory and path helpers
//! - [`observability`]: file-based structured logging
//!
//! # Configuration
//!
//! Read from `<data dir>/config.toml` or `--config`:
//!
//! ```toml
//! store_path = "~/desk/registrations.json"
//! user = "office"
//! theme = "desk-light"
//! trace_level = "debug"
//! locale = "he"
//! ```
//!
//! # Example
//!
//! ```rust
//! use regdesk::{handle_event, AppState, Event, Field, Record, Theme};
//! use regdesk::storage::Snapshot;
//!
//! let records = vec![
//!     Record { school: "Alon".into(), ..Record::new("1", "Dana") },
//!     Record { school: "Ort".into(), ..Record::new("2", "Noa") },
//! ];
//! let mut state = AppState::new(Theme::default());
//! handle_event(&mut state, &Event::SnapshotLoaded(Snapshot::from_records(records)?))?;
//! handle_event(&mut state, &Event::SetSimpleFilter { field: Field::School, value: "Ort".into() })?;
//! assert_eq!(state.output().total_records, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod observability;
pub mod pipeline;
pub mod runtime;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{Field, Record, RegdeskError, Result};
pub use ui::Theme;

use crate::pipeline::Collator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// Every key is optional in the TOML file; missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON store file. Defaults to `<data dir>/registrations.json`.
    pub store_path: Option<String>,

    /// Operator name recorded on attendance updates.
    pub user: String,

    /// Built-in theme name (`desk-dark`, `desk-light`). Ignored if
    /// `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log filter directive, e.g. `debug` or `regdesk::pipeline=trace`.
    /// `RUST_LOG` takes precedence. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Language tag for sort collation.
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            user: "office".to_string(),
            theme: None,
            theme_file: None,
            trace_level: None,
            locale: "he".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RegdeskError::Config`] if the text is not valid TOML or a
    /// key has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use regdesk::Config;
    ///
    /// let config = Config::from_toml_str("user = \"maya\"\nlocale = \"en\"")?;
    /// assert_eq!(config.user, "maya");
    /// assert!(config.theme.is_none());
    /// # Ok::<(), regdesk::RegdeskError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RegdeskError::Config(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RegdeskError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RegdeskError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Store file with `~` expanded, or the default location.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.as_deref().map_or_else(infrastructure::default_store_path, |p| {
            PathBuf::from(infrastructure::expand_tilde(p))
        })
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds an empty [`AppState`] from configuration, waiting for its first
/// snapshot.
#[must_use]
pub fn initialize(config: &Config, theme: Theme) -> AppState {
    tracing::debug!(locale = %config.locale, theme = %theme.name, "initializing regdesk");
    AppState::with_collator(theme, Collator::for_locale(&config.locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_toml_str("theme = \"desk-light\"").unwrap();
        assert_eq!(config.user, "office");
        assert_eq!(config.locale, "he");
        assert_eq!(config.load_theme().name, "desk-light");
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(
            Config::from_toml_str("user = ["),
            Err(RegdeskError::Config(_))
        ));
        assert!(matches!(Config::from_toml_str("user = 3"), Err(RegdeskError::Config(_))));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());
    }

    #[test]
    fn explicit_store_path_is_used() {
        let config = Config {
            store_path: Some("/srv/desk.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.store_path(), PathBuf::from("/srv/desk.json"));
    }
}
