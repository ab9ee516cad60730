use crate::editor::Direction;

use super::Model;
use super::model::{Focus, ToastLevel};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Title editing
    /// Insert a character into the title at the cursor
    TitleInsert(char),
    /// Delete the title character before the cursor
    TitleBackspace,
    /// Delete the title character at the cursor
    TitleDeleteForward,
    /// Move the title cursor one char left
    TitleMoveLeft,
    /// Move the title cursor one char right
    TitleMoveRight,
    /// Move the title cursor to the start
    TitleMoveHome,
    /// Move the title cursor to the end
    TitleMoveEnd,

    // Body editing
    /// Insert a character at the body cursor
    BodyInsert(char),
    /// Split the line at the body cursor (Enter)
    BodyNewline,
    /// Delete the body character before the cursor (Backspace)
    BodyBackspace,
    /// Delete the body character at the cursor (Delete)
    BodyDeleteForward,
    /// Move the body cursor in a direction
    BodyMove(Direction),
    /// Move the body cursor to the beginning of the line (Home)
    BodyMoveHome,
    /// Move the body cursor to the end of the line (End)
    BodyMoveEnd,
    /// Move the body cursor one page up
    BodyPageUp,
    /// Move the body cursor one page down
    BodyPageDown,

    // Focus and overlays
    /// Switch between title and body panes
    SwitchFocus,
    /// Enter command mode (Esc while editing)
    EnterCommandMode,
    /// Close the topmost overlay: help, then command mode
    CloseOverlay,
    /// Toggle the help overlay
    ToggleHelp,

    // Persistence
    /// Flush the draft to disk immediately
    ForceSave,
    /// Show the word count in a toast
    ShowWordCount,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Save and quit
    Quit,
}

/// Byte offset of the `char_idx`-th char in `s`.
fn byte_idx(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}

/// Pure state transition: apply a message to the model.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::TitleInsert(c) => {
            let idx = byte_idx(&model.title, model.title_cursor);
            model.title.insert(idx, c);
            model.title_cursor += 1;
            model.push_title();
        }
        Message::TitleBackspace => {
            if model.title_cursor > 0 {
                let idx = byte_idx(&model.title, model.title_cursor - 1);
                model.title.remove(idx);
                model.title_cursor -= 1;
                model.push_title();
            }
        }
        Message::TitleDeleteForward => {
            if model.title_cursor < model.title.chars().count() {
                let idx = byte_idx(&model.title, model.title_cursor);
                model.title.remove(idx);
                model.push_title();
            }
        }
        Message::TitleMoveLeft => {
            model.title_cursor = model.title_cursor.saturating_sub(1);
        }
        Message::TitleMoveRight => {
            model.title_cursor = (model.title_cursor + 1).min(model.title.chars().count());
        }
        Message::TitleMoveHome => model.title_cursor = 0,
        Message::TitleMoveEnd => model.title_cursor = model.title.chars().count(),

        Message::BodyInsert(c) => {
            model.body.insert_char(c);
            model.push_body();
        }
        Message::BodyNewline => {
            model.body.insert_newline();
            model.push_body();
        }
        Message::BodyBackspace => {
            model.body.backspace();
            model.push_body();
        }
        Message::BodyDeleteForward => {
            model.body.delete_forward();
            model.push_body();
        }
        Message::BodyMove(direction) => model.body.move_cursor(direction),
        Message::BodyMoveHome => model.body.move_home(),
        Message::BodyMoveEnd => model.body.move_end(),
        Message::BodyPageUp => {
            let page = model.body_height().max(1);
            let cursor = model.body.cursor();
            model.body.move_to(cursor.line.saturating_sub(page), cursor.col);
        }
        Message::BodyPageDown => {
            let page = model.body_height().max(1);
            let cursor = model.body.cursor();
            model.body.move_to(cursor.line + page, cursor.col);
        }

        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Title => Focus::Body,
                Focus::Body => Focus::Title,
            };
            model.command_mode = false;
        }
        Message::EnterCommandMode => model.command_mode = true,
        Message::CloseOverlay => {
            if model.help_visible {
                model.help_visible = false;
            } else {
                model.command_mode = false;
            }
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,

        Message::ForceSave => {
            model.scheduler.force_save();
            let note = if model.read_only {
                "Read-only session, draft not written"
            } else {
                "Draft saved"
            };
            model.show_toast(ToastLevel::Info, note);
        }
        Message::ShowWordCount => {
            let words = model.body.word_count();
            model.show_toast(ToastLevel::Info, format!("{words} words"));
        }

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }

        Message::Quit => {
            model.scheduler.force_save();
            model.should_quit = true;
        }
    }
    model
}
