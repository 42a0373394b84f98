//! Footer component renderer.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Appends the dimmed, centered page summary.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&center(&footer.text, cols));
    out.push_str(theme.reset());
    out.push('\n');
}
