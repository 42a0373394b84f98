//! Table component renderer.
//!
//! Renders the current page as fixed-width columns. Column widths come from
//! the widest cell on the page, capped so the row fits the terminal. In the
//! arrivals view each row starts with an arrival mark.

use crate::ui::helpers::{display_width, fit, highlight_matches};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RowItem, UIViewModel};

const COLUMN_GAP: &str = "  ";
const MAX_COLUMN_WIDTH: usize = 24;
const MIN_COLUMN_WIDTH: usize = 4;
const MARK_WIDTH: usize = 2;

/// Computes a display width per column for the page in `vm`.
#[must_use]
pub fn column_widths(vm: &UIViewModel) -> Vec<usize> {
    let mut widths: Vec<usize> = vm
        .columns
        .iter()
        .enumerate()
        .map(|(i, label)| {
            vm.rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| display_width(cell))
                .chain(std::iter::once(display_width(label)))
                .max()
                .unwrap_or(0)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect();

    let mark = if has_marks(vm) { MARK_WIDTH } else { 0 };
    let gaps = COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let available = vm.width.saturating_sub(mark + gaps);

    while widths.iter().sum::<usize>() > available {
        let Some(widest) = widths.iter_mut().filter(|w| **w > MIN_COLUMN_WIDTH).max() else {
            break;
        };
        *widest -= 1;
    }
    widths
}

fn has_marks(vm: &UIViewModel) -> bool {
    vm.rows.iter().any(|row| row.arrived.is_some())
}

/// Appends the bold column-title row.
pub fn render_table_headers(out: &mut String, vm: &UIViewModel, widths: &[usize], theme: &Theme) {
    out.push_str(theme.bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if has_marks(vm) {
        out.push_str(&" ".repeat(MARK_WIDTH));
    }
    let titles: Vec<String> = vm
        .columns
        .iter()
        .zip(widths)
        .map(|(label, &width)| fit(label, width))
        .collect();
    out.push_str(titles.join(COLUMN_GAP).trim_end());
    out.push_str(theme.reset());
    out.push('\n');
}

/// Appends every row of the page, highlighting `needle` in cell text.
pub fn render_table_rows(out: &mut String, rows: &[RowItem], widths: &[usize], needle: &str, theme: &Theme) {
    for row in rows {
        render_table_row(out, row, widths, needle, theme);
    }
}

fn render_table_row(out: &mut String, row: &RowItem, widths: &[usize], needle: &str, theme: &Theme) {
    match row.arrived {
        Some(true) => {
            out.push_str(&Theme::fg(&theme.colors.arrived_fg));
            out.push_str("✓ ");
        }
        Some(false) => {
            out.push_str(&Theme::fg(&theme.colors.pending_fg));
            out.push_str("· ");
        }
        None => {}
    }

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    let cells: Vec<String> = row
        .cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| highlight_matches(&fit(cell, width), needle, theme))
        .collect();
    out.push_str(cells.join(COLUMN_GAP).trim_end());
    out.push_str(theme.reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{FooterInfo, HeaderInfo};

    fn vm(width: usize, rows: Vec<RowItem>) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo { title: String::new() },
            columns: vec!["Child".into(), "School".into()],
            rows,
            badges: vec![],
            footer: FooterInfo { text: String::new() },
            search_bar: None,
            empty_state: None,
            width,
        }
    }

    fn row(cells: [&str; 2]) -> RowItem {
        RowItem {
            cells: cells.iter().map(ToString::to_string).collect(),
            arrived: None,
        }
    }

    #[test]
    fn widths_follow_widest_cell() {
        let vm = vm(80, vec![row(["Dana", "Alon"]), row(["Yehonatan", "Ort"])]);
        assert_eq!(column_widths(&vm), [9, 6]);
    }

    #[test]
    fn widths_shrink_to_fit_terminal() {
        let long = "x".repeat(30);
        let vm = vm(20, vec![row([long.as_str(), long.as_str()])]);
        let widths = column_widths(&vm);
        assert!(widths.iter().sum::<usize>() + COLUMN_GAP.len() <= 20);
    }

    #[test]
    fn arrival_marks_prefix_rows() {
        let mut out = String::new();
        let rows = [RowItem {
            cells: vec!["Dana".into(), "Alon".into()],
            arrived: Some(true),
        }];
        render_table_rows(&mut out, &rows, &[5, 5], "", &Theme::monochrome());
        assert_eq!(out, "✓ Dana   Alon\n");
    }
}
