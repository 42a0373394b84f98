//! Header component renderer.
//!
//! Renders the title bar with centered text, theme colors, and optional
//! background.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the centered, bold title line.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    out.push_str(theme.bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&center(&header.title, cols));
    out.push_str(theme.reset());
    out.push('\n');
}
