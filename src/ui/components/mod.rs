//! Composable UI component renderers.
//!
//! Each component appends its lines to a shared output buffer.
//!
//! # Components
//!
//! - [`header`]: title bar with counts and filter mode
//! - [`badges`]: per-filter result counts
//! - [`search`]: search query box
//! - [`table`]: the current page as columns
//! - [`footer`]: page position
//! - [`empty`]: loading, failure and no-match messages
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Badges]        (when filters are active)
//! [Search Bar]    (when a query is active)
//! [Table Headers]
//! [Table Rows]    (or the empty state)
//! [Border]
//! [Footer]
//! ```

mod badges;
mod empty;
mod footer;
mod header;
mod search;
mod table;

pub use table::column_widths;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use badges::render_badges;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Appends a horizontal rule the width of the terminal.
fn render_border(out: &mut String, color: &str, theme: &Theme, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(theme.reset());
    out.push('\n');
}

/// Renders the full page layout into a string.
#[must_use]
pub fn render_page(vm: &UIViewModel, theme: &Theme) -> String {
    let cols = vm.width;
    let mut out = String::new();

    render_header(&mut out, &vm.header, theme, cols);
    render_border(&mut out, &theme.colors.border, theme, cols);
    render_badges(&mut out, &vm.badges, theme, cols);

    let needle = vm
        .search_bar
        .as_ref()
        .map(|search| search.query.to_lowercase())
        .unwrap_or_default();
    if let Some(search) = &vm.search_bar {
        render_search_bar(&mut out, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(&mut out, empty, theme, cols);
    } else {
        let widths = column_widths(vm);
        render_table_headers(&mut out, vm, &widths, theme);
        render_table_rows(&mut out, &vm.rows, &widths, &needle, theme);
    }

    render_border(&mut out, &theme.colors.border, theme, cols);
    render_footer(&mut out, &vm.footer, theme, cols);
    out
}
