//! Search bar component renderer.
//!
//! Draws the active query inside a bordered frame.

use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 2;

/// Appends the three-line search box.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    out.push_str(&format!("{margin}{border}┌{}┐{}\n", "─".repeat(inner_width), theme.reset()));
    out.push_str(&format!(
        "{margin}{border}│{}{}{border}│{}\n",
        Theme::fg(&theme.colors.text_normal),
        fit(&format!(" Search: {}", search.query), inner_width),
        theme.reset()
    ));
    out.push_str(&format!("{margin}{border}└{}┘{}\n", "─".repeat(inner_width), theme.reset()));
}
