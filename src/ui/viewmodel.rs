//! View model types representing renderable UI state.
//!
//! View models are computed from application state and contain only
//! display-ready data: pre-formatted cells, labels and counts. They carry no
//! business logic.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer.
//!
//! # Example
//!
//! ```rust
//! use regdesk::ui::viewmodel::{FooterInfo, HeaderInfo, RowItem, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Registrations (1/1) [simple] ".to_string() },
//!     columns: vec!["Child".to_string(), "School".to_string()],
//!     rows: vec![RowItem {
//!         cells: vec!["Dana".to_string(), "Alon".to_string()],
//!         arrived: None,
//!     }],
//!     badges: vec![],
//!     footer: FooterInfo { text: "page 1/1  ·  1 records".to_string() },
//!     search_bar: None,
//!     empty_state: None,
//!     width: 80,
//! };
//! assert_eq!(vm.rows[0].cells.len(), vm.columns.len());
//! ```

/// Complete UI view model for rendering one page of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Column titles, with a direction arrow on the sorted column.
    pub columns: Vec<String>,

    /// Rows of the current page only.
    pub rows: Vec<RowItem>,

    /// Per-filter result counts.
    pub badges: Vec<BadgeInfo>,

    pub footer: FooterInfo,

    /// Present while a search query is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Replaces the table while loading, on failure, or when nothing matches.
    pub empty_state: Option<EmptyState>,

    /// Terminal width in columns.
    pub width: usize,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItem {
    /// Cell texts in column order.
    pub cells: Vec<String>,

    /// Arrival mark, only in the arrivals view.
    pub arrived: Option<bool>,
}

/// Count of current results matching one active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeInfo {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, including result and total counts.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Page position and result size.
    pub text: String,
}

/// Message shown in place of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No matching registrations").
    pub message: String,

    /// Secondary hint; may be empty.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Search text as typed, trimmed.
    pub query: String,
}
