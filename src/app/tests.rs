use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::autosave::{AutosaveTiming, EditorDocument};
use crate::shortcuts::LocalActions;

use super::model::Focus;
use super::{App, Message, Model, update};

const TIMING: AutosaveTiming = AutosaveTiming {
    debounce_ms: 100,
    interval_ms: 1000,
};

fn recording_model(initial: EditorDocument) -> (Model, Rc<RefCell<Vec<EditorDocument>>>) {
    let saves = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&saves);
    let model = Model::new(
        PathBuf::from("notes.draft.json"),
        initial,
        TIMING,
        Box::new(move |doc| sink.borrow_mut().push(doc.clone())),
        (80, 24),
    );
    (model, saves)
}

fn test_model() -> Model {
    recording_model(EditorDocument {
        title: "Notes".to_string(),
        content: "hello".to_string(),
    })
    .0
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[test]
fn test_body_insert_updates_scheduler_snapshot() {
    let model = test_model();
    let model = update(model, Message::BodyInsert('!'));
    assert_eq!(model.scheduler.document().content, "!hello");
    assert!(model.scheduler.is_dirty());
}

#[test]
fn test_title_insert_appends_at_cursor() {
    let model = test_model();
    // Cursor starts at the end of the loaded title.
    let model = update(model, Message::TitleInsert('!'));
    assert_eq!(model.title, "Notes!");
    assert_eq!(model.scheduler.document().title, "Notes!");
}

#[test]
fn test_debounced_save_after_quiet_typing() {
    let (model, saves) = recording_model(EditorDocument {
        title: "Notes".to_string(),
        content: String::new(),
    });
    let mut model = update(model, Message::BodyInsert('h'));
    model = update(model, Message::BodyInsert('i'));
    model.scheduler.tick(TIMING.debounce_ms);

    let saves = saves.borrow();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].content, "hi");
    assert_eq!(saves[0].title, "Notes");
}

#[test]
fn test_seeded_title_is_not_persisted_until_real_edit() {
    let (mut model, saves) = recording_model(EditorDocument::default());
    model.seed_default_title();
    assert_eq!(model.title, "notes.draft");
    assert!(model.title_is_placeholder());

    // Body edits save, but the placeholder title rolls back to "".
    let mut model = update(model, Message::BodyInsert('x'));
    model.scheduler.tick(TIMING.debounce_ms);
    assert_eq!(saves.borrow().len(), 1);
    assert_eq!(saves.borrow()[0].title, "");
    assert_eq!(saves.borrow()[0].content, "x");

    // A real title edit re-enables the field.
    let mut model = update(model, Message::TitleInsert('A'));
    assert!(!model.title_is_placeholder());
    model.scheduler.tick(TIMING.debounce_ms * 3);
    assert_eq!(saves.borrow().last().unwrap().title, "notes.draftA");
}

#[test]
fn test_quit_flushes_pending_edits() {
    let (model, saves) = recording_model(EditorDocument {
        title: "Notes".to_string(),
        content: String::new(),
    });
    let model = update(model, Message::BodyInsert('x'));
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
    assert_eq!(saves.borrow().len(), 1);
    assert_eq!(saves.borrow()[0].content, "x");
}

#[test]
fn test_force_save_shows_toast() {
    let model = update(test_model(), Message::BodyInsert('x'));
    let model = update(model, Message::ForceSave);
    let (message, _) = model.active_toast().unwrap();
    assert!(message.contains("saved"), "toast was: {message}");
    assert!(!model.scheduler.is_dirty());
}

#[test]
fn test_show_word_count_reports_body_words() {
    let model = update(test_model(), Message::ShowWordCount);
    let (message, _) = model.active_toast().unwrap();
    assert_eq!(message, "1 words");
}

#[test]
fn test_switch_focus_toggles_and_leaves_command_mode() {
    let mut model = test_model();
    model.command_mode = true;
    assert_eq!(model.focus, Focus::Body);

    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.focus, Focus::Title);
    assert!(!model.command_mode);
}

#[test]
fn test_close_overlay_prefers_help_over_command_mode() {
    let mut model = test_model();
    model.help_visible = true;
    model.command_mode = true;

    let model = update(model, Message::CloseOverlay);
    assert!(!model.help_visible);
    assert!(model.command_mode, "help closes first");

    let model = update(model, Message::CloseOverlay);
    assert!(!model.command_mode);
}

#[test]
fn test_resize_updates_terminal_size() {
    let model = update(test_model(), Message::Resize(100, 40));
    assert_eq!(model.terminal_size, (100, 40));
}

#[test]
fn test_typing_letter_inserts_instead_of_dispatching() {
    let model = test_model();
    let msg = App::handle_key(key(KeyCode::Char('f')), &model);
    assert_eq!(msg, Some(Message::BodyInsert('f')));
}

#[test]
fn test_ctrl_chord_dispatches_while_editing() {
    let model = test_model();
    assert_eq!(App::handle_key(ctrl_key('s'), &model), Some(Message::ForceSave));
    assert_eq!(App::handle_key(ctrl_key('q'), &model), Some(Message::Quit));
}

#[test]
fn test_f1_toggles_help_while_editing() {
    let model = test_model();
    let msg = App::handle_key(key(KeyCode::F(1)), &model);
    assert_eq!(msg, Some(Message::ToggleHelp));
}

#[test]
fn test_escape_enters_command_mode_then_letters_trigger_by_name() {
    let mut model = test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::EnterCommandMode)
    );

    model.command_mode = true;
    assert_eq!(App::handle_key(key(KeyCode::Char('s')), &model), Some(Message::ForceSave));
    assert_eq!(App::handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));
    assert_eq!(
        App::handle_key(key(KeyCode::Char('h')), &model),
        Some(Message::ToggleHelp)
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('z')), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::CloseOverlay)
    );
}

#[test]
fn test_any_key_closes_help_overlay() {
    let mut model = test_model();
    model.help_visible = true;
    let msg = App::handle_key(key(KeyCode::Char('x')), &model);
    assert_eq!(msg, Some(Message::CloseOverlay));
}

#[test]
fn test_tab_switches_focus_even_while_editing() {
    let model = test_model();
    let msg = App::handle_key(key(KeyCode::Tab), &model);
    assert_eq!(msg, Some(Message::SwitchFocus));
}

#[test]
fn test_trigger_by_name_without_binding_is_noop() {
    let model = test_model();
    // Without the local bindings, "help" resolves to no action at all.
    assert_eq!(
        model.dispatcher.trigger_by_name("help", &LocalActions::new()),
        None
    );
    // Unknown names are equally silent.
    assert_eq!(
        model.dispatcher.trigger_by_name("no-such", &LocalActions::new()),
        None
    );
}

#[test]
fn test_title_enter_moves_to_body() {
    let mut model = test_model();
    model.focus = Focus::Title;
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::SwitchFocus)
    );
}

#[test]
fn test_page_down_moves_cursor_a_page() {
    let content = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let (model, _) = recording_model(EditorDocument {
        title: "Long".to_string(),
        content,
    });
    let model = update(model, Message::BodyPageDown);
    assert_eq!(model.body.cursor().line, model.body_height());
}
