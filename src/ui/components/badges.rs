//! Filter badge strip.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BadgeInfo;

/// Appends one line of `label (count)` badges; nothing when no filter is set.
pub fn render_badges(out: &mut String, badges: &[BadgeInfo], theme: &Theme, cols: usize) {
    if badges.is_empty() {
        return;
    }

    let line = badges
        .iter()
        .map(|b| format!("[{} ({})]", b.label, b.count))
        .collect::<Vec<_>>()
        .join(" ");

    out.push_str(&Theme::fg(&theme.colors.badge_fg));
    out.push_str(&truncate(&line, cols));
    out.push_str(theme.reset());
    out.push('\n');
}
