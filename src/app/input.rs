use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::Direction;
use crate::shortcuts::{Dispatch, KeyPress, LocalActions};

use super::model::Focus;
use super::{App, Message, Model};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::handle_key(*key, model)
            }
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    /// Bindings supplied by the editor view for the local shortcuts it
    /// knows how to service.
    pub(super) fn local_actions() -> LocalActions<Message> {
        LocalActions::new()
            .bind("help", Message::ToggleHelp)
            .bind("switch-focus", Message::SwitchFocus)
            .bind("word-count", Message::ShowWordCount)
            .bind("close", Message::CloseOverlay)
    }

    /// Whether a key press would be consumed by the focused text pane.
    /// Such events never reach the shortcut dispatcher, mirroring the
    /// "ignore events targeting a text input" rule.
    fn targets_editor(key: KeyEvent, model: &Model) -> bool {
        if model.command_mode {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return false;
        }
        matches!(
            key.code,
            KeyCode::Char(_)
                | KeyCode::Enter
                | KeyCode::Backspace
                | KeyCode::Delete
                | KeyCode::Esc
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        )
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::CloseOverlay);
        }

        // Registry dispatch first; typing-bound keys pass straight through.
        if let Some(press) = KeyPress::from_event(&key) {
            let editing = Self::targets_editor(key, model);
            match model
                .dispatcher
                .dispatch(&press, editing, &Self::local_actions())
            {
                Dispatch::Action(msg) => return Some(msg),
                Dispatch::Handled => return None,
                Dispatch::Pass => {}
            }
        }

        if model.command_mode {
            // Command-mode letters reuse the registry names, so the same
            // action is reachable with or without its chord.
            return match key.code {
                KeyCode::Char('s') => model
                    .dispatcher
                    .trigger_by_name("save", &Self::local_actions()),
                KeyCode::Char('q') => model
                    .dispatcher
                    .trigger_by_name("quit", &Self::local_actions()),
                KeyCode::Char('h' | '?') => model
                    .dispatcher
                    .trigger_by_name("help", &Self::local_actions()),
                KeyCode::Char('w') => model
                    .dispatcher
                    .trigger_by_name("word-count", &Self::local_actions()),
                KeyCode::Char('i') | KeyCode::Enter => Some(Message::CloseOverlay),
                _ => None,
            };
        }

        match model.focus {
            Focus::Title => Self::handle_title_key(key),
            Focus::Body => Self::handle_body_key(key),
        }
    }

    fn handle_title_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char(c) => Some(Message::TitleInsert(c)),
            KeyCode::Backspace => Some(Message::TitleBackspace),
            KeyCode::Delete => Some(Message::TitleDeleteForward),
            KeyCode::Left => Some(Message::TitleMoveLeft),
            KeyCode::Right => Some(Message::TitleMoveRight),
            KeyCode::Home => Some(Message::TitleMoveHome),
            KeyCode::End => Some(Message::TitleMoveEnd),
            // Enter and Down drop into the body
            KeyCode::Enter | KeyCode::Down => Some(Message::SwitchFocus),
            KeyCode::Esc => Some(Message::EnterCommandMode),
            _ => None,
        }
    }

    fn handle_body_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char(c) => Some(Message::BodyInsert(c)),
            KeyCode::Enter => Some(Message::BodyNewline),
            KeyCode::Backspace => Some(Message::BodyBackspace),
            KeyCode::Delete => Some(Message::BodyDeleteForward),
            KeyCode::Up => Some(Message::BodyMove(Direction::Up)),
            KeyCode::Down => Some(Message::BodyMove(Direction::Down)),
            KeyCode::Left => Some(Message::BodyMove(Direction::Left)),
            KeyCode::Right => Some(Message::BodyMove(Direction::Right)),
            KeyCode::Home => Some(Message::BodyMoveHome),
            KeyCode::End => Some(Message::BodyMoveEnd),
            KeyCode::PageUp => Some(Message::BodyPageUp),
            KeyCode::PageDown => Some(Message::BodyPageDown),
            KeyCode::Esc => Some(Message::EnterCommandMode),
            _ => None,
        }
    }
}
