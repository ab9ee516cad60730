// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. autosave::AutosaveScheduler)
    clippy::module_name_repetitions
)]

//! # Draftpad
//!
//! A distraction-free terminal writing pad with auto-save.
//!
//! Draftpad edits a single titled draft and persists it continuously:
//! - Debounced auto-save after a quiet typing period
//! - Periodic interval saves as a backstop during sustained typing
//! - Placeholder fields held back from disk until a real edit
//! - A named shortcut registry with global and view-local actions
//!
//! ## Architecture
//!
//! Draftpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`autosave`]: Debounce/interval save scheduler
//! - [`shortcuts`]: Keyboard shortcut registry and dispatcher
//! - [`editor`]: Rope-backed text buffer with cursor movement
//! - [`store`]: Draft persistence on disk
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod autosave;
pub mod config;
pub mod editor;
pub mod shortcuts;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::autosave::{AutosaveScheduler, AutosaveTiming, EditorDocument};
    pub use crate::shortcuts::{Dispatch, KeyPress, ShortcutDispatcher};
}
