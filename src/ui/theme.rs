//! Theme management and ANSI escape sequence generation.
//!
//! Supports built-in themes and custom themes loaded from TOML files, and
//! converts hex colors to 24-bit ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `desk-dark`: dark theme (default)
//! - `desk-light`: light theme for bright office screens
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! text_normal = "#c9d1d9"
//! text_dim = "#6e7681"
//! border = "#30363d"
//! search_bar_border = "#d2a8ff"
//! match_highlight_fg = "#0d1117"
//! match_highlight_bg = "#e3b341"
//! badge_fg = "#79c0ff"
//! arrived_fg = "#3fb950"
//! pending_fg = "#f85149"
//! empty_state_fg = "#58a6ff"
//! ```
//!
//! An empty color string disables that color, which is how
//! [`Theme::monochrome`] renders plain text.
//!
//! # Example
//!
//! ```rust
//! use regdesk::ui::theme::Theme;
//!
//! let theme = Theme::from_name("desk-light").unwrap();
//! assert!(Theme::fg(&theme.colors.header_fg).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{RegdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "desk-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#c9d1d9"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, column rules and secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Search match foreground inside table cells.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Filter badge counts.
    pub badge_fg: String,

    /// Arrival mark for present children.
    pub arrived_fg: String,
    /// Arrival mark for children not yet marked.
    pub pending_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use regdesk::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::from_name("desk-dark").unwrap().name, "desk-dark");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "desk-dark" => include_str!("../../themes/desk-dark.toml"),
            "desk-light" => include_str!("../../themes/desk-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RegdeskError::Theme`] if the file cannot be read or the TOML
    /// does not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| RegdeskError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| RegdeskError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// A theme with every color disabled, for pipes and `NO_COLOR`.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: String::new(),
                header_bg: None,
                text_normal: String::new(),
                text_dim: String::new(),
                border: String::new(),
                search_bar_border: String::new(),
                match_highlight_fg: String::new(),
                match_highlight_bg: String::new(),
                badge_fg: String::new(),
                arrived_fg: String::new(),
                pending_fg: String::new(),
                empty_state_fg: String::new(),
            },
        }
    }

    /// Converts a hex color to RGB. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground sequence for a hex color; empty for `""`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        if hex.is_empty() {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background sequence for a hex color; empty for `""`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        if hex.is_empty() {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Whether this theme emits any styling at all.
    #[must_use]
    pub fn is_styled(&self) -> bool {
        !self.colors.text_normal.is_empty()
    }

    #[must_use]
    pub fn bold(&self) -> &'static str {
        if self.is_styled() {
            "\u{001b}[1m"
        } else {
            ""
        }
    }

    #[must_use]
    pub fn dim(&self) -> &'static str {
        if self.is_styled() {
            "\u{001b}[2m"
        } else {
            ""
        }
    }

    /// Clears all styling.
    #[must_use]
    pub fn reset(&self) -> &'static str {
        if self.is_styled() {
            "\u{001b}[0m"
        } else {
            ""
        }
    }
}

impl Default for Theme {
    /// Returns the `desk-dark` theme, or monochrome if it fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!(theme = DEFAULT_THEME, "built-in theme failed to parse");
            Self::monochrome()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        assert!(Theme::from_name("desk-light").is_some());
    }

    #[test]
    fn hex_converts_to_truecolor() {
        assert_eq!(Theme::fg("#0d1117"), "\u{1b}[38;2;13;17;23m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg(""), "");
    }

    #[test]
    fn monochrome_emits_no_escapes() {
        let theme = Theme::monochrome();
        assert_eq!(theme.bold(), "");
        assert_eq!(theme.reset(), "");
    }

    #[test]
    fn custom_theme_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mine.toml");
        let mut theme = Theme::default();
        theme.name = "mine".to_string();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(RegdeskError::Theme(_))
        ));
    }
}
