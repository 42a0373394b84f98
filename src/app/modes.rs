//! View mode of the dashboard.
//!
//! The view mode picks the base record set before any filtering:
//! - **Registrations**: the whole snapshot
//! - **Arrivals**: the active cohort only, annotated with attendance marks
//!
//! # Example
//!
//! ```
//! use regdesk::app::ViewMode;
//!
//! let mode: ViewMode = "arrivals".parse().unwrap();
//! assert_eq!(mode, ViewMode::Arrivals);
//! assert_eq!(mode.as_str(), "arrivals");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Full registration table.
    #[default]
    Registrations,

    /// Daily arrivals for one cohort.
    ///
    /// Needs an active cohort; without one the table is empty.
    Arrivals,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrations => "registrations",
            Self::Arrivals => "arrivals",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Registrations => "Registrations",
            Self::Arrivals => "Arrivals",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registrations" => Ok(Self::Registrations),
            "arrivals" => Ok(Self::Arrivals),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}
