//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: lay the components out into one string
//!
//! # Example
//!
//! ```rust
//! use regdesk::app::AppState;
//! use regdesk::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::monochrome());
//! let screen = render(&state, 60);
//! assert!(screen.contains("Loading registrations"));
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the current page of `state` for a terminal `cols` wide.
///
/// The caller decides where the output goes; nothing is printed here.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let _span = tracing::debug_span!("render", cols).entered();
    let viewmodel = state.compute_viewmodel(cols);
    components::render_page(&viewmodel, &state.theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, Record};
    use crate::storage::Snapshot;
    use crate::ui::Theme;

    fn state() -> AppState {
        let mut state = AppState::new(Theme::monochrome());
        let records = vec![
            Record {
                school: "Alon".into(),
                ..Record::new("r1", "Dana")
            },
            Record {
                school: "Ort".into(),
                ..Record::new("r2", "Noa")
            },
        ];
        state.load_snapshot(Snapshot::from_records(records).unwrap());
        state
    }

    #[test]
    fn renders_rows_and_footer() {
        let screen = render(&state(), 100);
        assert!(screen.contains("Dana"));
        assert!(screen.contains("Noa"));
        assert!(screen.contains("page 1/1  ·  2 records"));
        assert!(!screen.contains('\u{1b}'));
    }

    #[test]
    fn sorted_column_shows_arrow() {
        let mut state = state();
        state.click_sort(Field::School);
        state.click_sort(Field::School);
        let screen = render(&state, 100);
        assert!(screen.contains(&format!("{} ▼", Field::School.label())));
        assert!(screen.find("Noa") < screen.find("Dana"));
    }

    #[test]
    fn no_match_shows_empty_state() {
        let mut state = state();
        state.set_search("zzz");
        let screen = render(&state, 100);
        assert!(screen.contains("No matching registrations"));
        assert!(screen.contains("Search: zzz"));
    }
}
