//! User interface rendering layer with component-based architecture.
//!
//! Turns view models into ANSI-styled text through composable components. It
//! provides theme support, width-aware column layout, and search match
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: view model types representing renderable UI state
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: composable component renderers
//! - [`helpers`]: width-aware text fitting and match highlighting
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{BadgeInfo, EmptyState, FooterInfo, HeaderInfo, RowItem, SearchBarInfo, UIViewModel};
