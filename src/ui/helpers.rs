//! Shared rendering utilities.
//!
//! Table cells mix Hebrew, Latin and digits, so every width calculation goes
//! through `unicode-width` display columns rather than byte or char counts.
//!
//! # Example
//!
//! ```rust
//! use regdesk::ui::helpers::{fit, highlight_matches};
//! use regdesk::ui::Theme;
//!
//! assert_eq!(fit("Robotics", 5), "Robo…");
//! assert_eq!(fit("Art", 5), "Art  ");
//!
//! let plain = highlight_matches("Robotics", "bot", &Theme::monochrome());
//! assert_eq!(plain, "Robotics");
//! ```

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncates `text` to at most `width` columns, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Truncates or right-pads `text` to exactly `width` columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let pad = width.saturating_sub(display_width(&out));
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Centers `text` in a line of `width` columns.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let left = width.saturating_sub(display_width(&text)) / 2;
    let right = width.saturating_sub(left + display_width(&text));
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Wraps every case-insensitive occurrence of `needle` in the match colors.
///
/// `needle` must already be lower-cased. Text whose lower-case form changes
/// length is returned unstyled rather than risk splitting a character.
#[must_use]
pub fn highlight_matches(text: &str, needle: &str, theme: &Theme) -> String {
    if needle.is_empty() || !theme.is_styled() {
        return text.to_string();
    }

    let lowered = text.to_lowercase();
    if lowered.len() != text.len() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, _) in lowered.match_indices(needle) {
        if start < cursor || !text.is_char_boundary(start) || !text.is_char_boundary(start + needle.len()) {
            continue;
        }
        let end = start + needle.len();
        out.push_str(&text[cursor..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.push_str(&text[start..end]);
        out.push_str(theme.reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
