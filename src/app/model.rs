use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::autosave::{
    AutosaveScheduler, AutosaveTiming, DocumentPatch, EditorDocument, Field, SaveFn,
};
use crate::editor::EditorBuffer;
use crate::shortcuts::ShortcutDispatcher;

use super::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives typed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Title,
    #[default]
    Body,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The shortcut
/// dispatcher and the auto-save scheduler are plain fields, constructed
/// once in [`Model::new`] and dropped with the model.
pub struct Model {
    /// Path of the draft file on disk
    pub draft_path: PathBuf,
    /// Auto-save scheduler owning the canonical document snapshot
    pub scheduler: AutosaveScheduler,
    /// Shortcut dispatcher owning the global action table
    pub dispatcher: ShortcutDispatcher<Message>,
    /// Body text buffer
    pub body: EditorBuffer,
    /// Title line under edit
    pub title: String,
    /// Char offset of the cursor within the title
    pub title_cursor: usize,
    /// Which pane receives typed text
    pub focus: Focus,
    /// Command mode: keys trigger shortcuts instead of inserting text
    pub command_mode: bool,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// First visible body line
    pub scroll_offset: usize,
    /// Terminal size (cols, rows)
    pub terminal_size: (u16, u16),
    /// Logical clock fed to the scheduler, refreshed by the event loop
    pub clock_ms: u64,
    /// Saves are skipped entirely in read-only sessions
    pub read_only: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("draft_path", &self.draft_path)
            .field("focus", &self.focus)
            .field("command_mode", &self.command_mode)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    /// Placeholder state used by `std::mem::take` in the event loop.
    fn default() -> Self {
        Self::new(
            PathBuf::new(),
            EditorDocument::default(),
            AutosaveTiming::default(),
            Box::new(|_| {}),
            (80, 24),
        )
    }
}

impl Model {
    /// Create a model around an initial document, wiring the save
    /// callback into the scheduler and the global shortcut actions into
    /// the dispatcher.
    pub fn new(
        draft_path: PathBuf,
        initial: EditorDocument,
        timing: AutosaveTiming,
        save: SaveFn,
        terminal_size: (u16, u16),
    ) -> Self {
        let mut dispatcher = ShortcutDispatcher::new();
        dispatcher.register_global("save", Message::ForceSave);
        dispatcher.register_global("quit", Message::Quit);

        let body = EditorBuffer::from_text(&initial.content);
        let title = initial.title.clone();
        Self {
            draft_path,
            scheduler: AutosaveScheduler::new(initial, timing, save),
            dispatcher,
            body,
            title_cursor: title.chars().count(),
            title,
            focus: Focus::default(),
            command_mode: false,
            help_visible: false,
            should_quit: false,
            scroll_offset: 0,
            terminal_size,
            clock_ms: 0,
            read_only: false,
            toast: None,
        }
    }

    /// Seed a fresh draft with a title derived from the file name. The
    /// update is flagged ignore-until-real-edit so the placeholder never
    /// reaches disk unless the user actually edits the title.
    pub fn seed_default_title(&mut self) {
        let derived = self
            .draft_path
            .file_stem()
            .map(|s| s.to_string_lossy().replace(['-', '_'], " "))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        self.title_cursor = derived.chars().count();
        self.title = derived.clone();
        self.scheduler
            .update(DocumentPatch::title(derived), true, self.clock_ms);
    }

    /// Push the current title into the scheduler as a real edit.
    pub fn push_title(&mut self) {
        self.scheduler
            .update(DocumentPatch::title(self.title.clone()), false, self.clock_ms);
    }

    /// Push the current body text into the scheduler as a real edit.
    pub fn push_body(&mut self) {
        self.scheduler
            .update(DocumentPatch::content(self.body.text()), false, self.clock_ms);
    }

    pub fn title_is_placeholder(&self) -> bool {
        self.scheduler.is_ignored(Field::Title)
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Drop an expired toast. Returns true when the toast was removed so
    /// the caller knows to repaint.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
            true
        } else {
            false
        }
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast.as_ref().map(|t| (t.message.as_str(), t.level))
    }

    /// Rows available to the body pane: total minus title, separator and
    /// status line.
    pub fn body_height(&self) -> usize {
        usize::from(self.terminal_size.1.saturating_sub(3))
    }

    /// Clamp the scroll offset so the body cursor stays on screen.
    pub fn ensure_cursor_visible(&mut self) {
        let height = self.body_height().max(1);
        let line = self.body.cursor().line;
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
    }
}
