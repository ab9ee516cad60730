//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::autosave::AutosaveTiming;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    draft_path: PathBuf,
    timing: AutosaveTiming,
    read_only: bool,
}

impl App {
    /// Create a new application for the given draft file.
    pub fn new(draft_path: PathBuf) -> Self {
        Self {
            draft_path,
            timing: AutosaveTiming::default(),
            read_only: false,
        }
    }

    /// Override the auto-save debounce and interval.
    pub const fn with_autosave_timing(mut self, timing: AutosaveTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Open the draft without ever writing it back.
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

#[cfg(test)]
mod tests;
