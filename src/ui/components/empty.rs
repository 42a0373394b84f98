//! Empty state component renderer.
//!
//! Shown instead of the table while loading, after a failed load, or when the
//! current filters match nothing.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&center(&empty.message, cols));
    out.push_str(theme.reset());
    out.push('\n');

    if !empty.subtitle.is_empty() {
        out.push_str(theme.dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&center(&empty.subtitle, cols));
        out.push_str(theme.reset());
        out.push('\n');
    }
    out.push('\n');
}
