//! Path utilities for data and configuration locations.
//!
//! Resolves where the store, config and log files live, and expands `~` in
//! user-supplied paths.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "REGDESK_DATA_DIR";

/// Default store file name inside the data directory.
pub const STORE_FILE_NAME: &str = "registrations.json";

/// Default config file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the data directory.
///
/// `REGDESK_DATA_DIR` wins when set and non-empty; otherwise
/// `$HOME/.local/share/regdesk`, falling back to `./.regdesk` without a home.
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn resolve_data_dir(override_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir.map(str::trim).filter(|d| !d.is_empty()) {
        return PathBuf::from(expand_tilde_with(dir, home));
    }
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".local").join("share").join("regdesk"),
        None => PathBuf::from(".regdesk"),
    }
}

/// Default JSON store location.
#[must_use]
pub fn default_store_path() -> PathBuf {
    data_dir().join(STORE_FILE_NAME)
}

/// Expands a leading `~` to `$HOME`.
///
/// # Examples
///
/// ```
/// use regdesk::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert!(!expand_tilde("~/data").starts_with('~') || std::env::var("HOME").is_err());
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.filter(|h| !h.is_empty()) else {
        return path.to_string();
    };
    if path.starts_with("~/") {
        path.replacen('~', home, 1)
    } else if path == "~" {
        home.to_string()
    } else {
        path.to_string()
    }
}
