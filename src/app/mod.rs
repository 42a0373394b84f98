//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the runtime (main.rs) and the domain, filter,
//! pipeline and storage layers. It implements the event-driven flow behind the
//! dashboard.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Results ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`handler`]: event processing and state transitions
//! - [`location`]: shareable cohort/date/view query string
//! - [`modes`]: registrations vs. arrivals view
//! - [`state`]: central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use regdesk::app::{handle_event, AppState, Event};
//! use regdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::NextPage)?;
//! assert!(actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod handler;
pub mod location;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use location::ShareableLocation;
pub use modes::ViewMode;
pub use state::{AppState, LoadState};
