//! Declarative keyboard shortcuts.
//!
//! A static, ordered registry of [`ShortcutDef`]s maps normalized key
//! presses to shortcut names; a [`ShortcutDispatcher`] resolves a name to
//! an action, preferring the mutable global binding table (for
//! definitions marked global) over the caller-supplied local bindings.
//! The dispatcher is an explicit instance owned by the application model,
//! not a module-level singleton, so ownership of the global table is
//! visible at construction time.
//!
//! Actions are plain values (the app uses [`Message`]) returned to the
//! caller for execution; keyboard dispatch and [`trigger_by_name`] share
//! the same resolution path, so menu-style invocations behave exactly
//! like key presses.
//!
//! [`Message`]: crate::app::Message
//! [`trigger_by_name`]: ShortcutDispatcher::trigger_by_name

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use once_cell::sync::Lazy;

/// Modifier constraints for a shortcut definition.
///
/// `None` means "don't care": the event may have the modifier pressed or
/// not. `Some(b)` must match the event state exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mods {
    pub ctrl: Option<bool>,
    pub alt: Option<bool>,
    pub shift: Option<bool>,
    pub meta: Option<bool>,
}

impl Mods {
    /// Every modifier unconstrained.
    pub const ANY: Self = Self {
        ctrl: None,
        alt: None,
        shift: None,
        meta: None,
    };

    /// Ctrl required, the rest unconstrained.
    pub const CTRL: Self = Self {
        ctrl: Some(true),
        alt: None,
        shift: None,
        meta: None,
    };

    /// No modifier may be pressed.
    pub const BARE: Self = Self {
        ctrl: Some(false),
        alt: Some(false),
        shift: Some(false),
        meta: Some(false),
    };
}

/// One entry in the static shortcut registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutDef {
    /// Stable name used for binding and programmatic triggering.
    pub name: &'static str,
    /// Normalized lowercase key name ("s", "tab", "f1", ...).
    pub key: &'static str,
    pub mods: Mods,
    /// Shown in the help overlay.
    pub description: &'static str,
    /// Whether the action is bound once per application via
    /// [`ShortcutDispatcher::register_global`] rather than supplied by
    /// the dispatching component.
    pub global: bool,
}

impl ShortcutDef {
    fn matches(&self, press: &KeyPress) -> bool {
        self.key == press.key
            && mod_ok(self.mods.ctrl, press.ctrl)
            && mod_ok(self.mods.alt, press.alt)
            && mod_ok(self.mods.shift, press.shift)
            && mod_ok(self.mods.meta, press.meta)
    }

    /// Human-readable binding, e.g. `ctrl+s` or `f1`.
    pub fn binding_label(&self) -> String {
        let mut label = String::new();
        if self.mods.ctrl == Some(true) {
            label.push_str("ctrl+");
        }
        if self.mods.alt == Some(true) {
            label.push_str("alt+");
        }
        if self.mods.shift == Some(true) {
            label.push_str("shift+");
        }
        if self.mods.meta == Some(true) {
            label.push_str("meta+");
        }
        label.push_str(self.key);
        label
    }
}

const fn mod_ok(want: Option<bool>, got: bool) -> bool {
    match want {
        None => true,
        Some(want) => want == got,
    }
}

/// Default bindings, in match-priority order: the first definition that
/// matches a key press wins and matching stops there.
pub static SHORTCUTS: &[ShortcutDef] = &[
    ShortcutDef {
        name: "save",
        key: "s",
        mods: Mods::CTRL,
        description: "Save the draft now",
        global: true,
    },
    ShortcutDef {
        name: "quit",
        key: "q",
        mods: Mods::CTRL,
        description: "Save and quit",
        global: true,
    },
    ShortcutDef {
        name: "help",
        key: "f1",
        mods: Mods::ANY,
        description: "Toggle the help overlay",
        global: false,
    },
    ShortcutDef {
        name: "switch-focus",
        key: "tab",
        mods: Mods::ANY,
        description: "Switch between title and body",
        global: false,
    },
    ShortcutDef {
        name: "word-count",
        key: "g",
        mods: Mods::CTRL,
        description: "Show the word count",
        global: false,
    },
    ShortcutDef {
        name: "close",
        key: "escape",
        mods: Mods::BARE,
        description: "Close overlay / leave command mode",
        global: false,
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static ShortcutDef>> =
    Lazy::new(|| SHORTCUTS.iter().map(|def| (def.name, def)).collect());

/// Look up a definition by its stable name.
pub fn find_by_name(name: &str) -> Option<&'static ShortcutDef> {
    BY_NAME.get(name).copied()
}

/// First definition in `defs` matching `press`, if any.
fn match_in<'a>(defs: &'a [ShortcutDef], press: &KeyPress) -> Option<&'a ShortcutDef> {
    defs.iter().find(|def| def.matches(press))
}

/// First registry definition matching `press`, if any.
pub fn match_shortcut(press: &KeyPress) -> Option<&'static ShortcutDef> {
    match_in(SHORTCUTS, press)
}

/// A physical key press normalized for matching: lowercase key name plus
/// the four modifier states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        let key: String = key.into();
        Self {
            key: key.to_lowercase(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Normalize a crossterm key event. Returns `None` for keys the
    /// registry has no vocabulary for (media keys and the like).
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let key = match event.code {
            KeyCode::Char(c) => c.to_lowercase().to_string(),
            KeyCode::F(n) => format!("f{n}"),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "escape".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pageup".to_string(),
            KeyCode::PageDown => "pagedown".to_string(),
            _ => return None,
        };
        Some(Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
            meta: event.modifiers.contains(KeyModifiers::SUPER),
        })
    }
}

/// Outcome of dispatching one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<A> {
    /// A definition matched and resolved to an action.
    Action(A),
    /// A definition matched but nothing is bound for its name. The event
    /// is still consumed.
    Handled,
    /// No definition matched (or the event targeted a text editor).
    Pass,
}

/// Per-call local bindings supplied by the dispatching component.
#[derive(Debug)]
pub struct LocalActions<A> {
    bindings: HashMap<&'static str, A>,
}

impl<A> LocalActions<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(mut self, name: &'static str, action: A) -> Self {
        self.bindings.insert(name, action);
        self
    }

    fn get(&self, name: &str) -> Option<&A> {
        self.bindings.get(name)
    }
}

impl<A> Default for LocalActions<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves key presses and names to actions. Owns the mutable
/// global-action table; the static definitions live in [`SHORTCUTS`].
#[derive(Debug)]
pub struct ShortcutDispatcher<A> {
    global: HashMap<&'static str, A>,
}

impl<A: Clone> ShortcutDispatcher<A> {
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
        }
    }

    /// Bind (or overwrite, last-register-wins) the application-wide
    /// action for a global-marked shortcut. Warns and no-ops when the
    /// name is unknown or the definition is not marked global.
    pub fn register_global(&mut self, name: &str, action: A) {
        match find_by_name(name) {
            Some(def) if def.global => {
                self.global.insert(def.name, action);
            }
            Some(_) => {
                tracing::warn!("shortcut '{name}' is not marked global, ignoring binding");
            }
            None => {
                tracing::warn!("cannot bind unknown shortcut '{name}'");
            }
        }
    }

    /// Translate a key press into an action.
    ///
    /// `editing_target` marks events aimed at a text-editing widget;
    /// those pass through untouched so typing never triggers shortcuts.
    pub fn dispatch(
        &self,
        press: &KeyPress,
        editing_target: bool,
        local: &LocalActions<A>,
    ) -> Dispatch<A> {
        if editing_target {
            return Dispatch::Pass;
        }
        let Some(def) = match_shortcut(press) else {
            return Dispatch::Pass;
        };
        self.resolve(def, local)
            .map_or(Dispatch::Handled, Dispatch::Action)
    }

    /// Resolve a shortcut by name, e.g. from a menu entry, using the same
    /// global-vs-local rules as keyboard dispatch. Unknown names warn and
    /// return `None`.
    pub fn trigger_by_name(&self, name: &str, local: &LocalActions<A>) -> Option<A> {
        let Some(def) = find_by_name(name) else {
            tracing::warn!("cannot trigger unknown shortcut '{name}'");
            return None;
        };
        self.resolve(def, local)
    }

    fn resolve(&self, def: &ShortcutDef, local: &LocalActions<A>) -> Option<A> {
        if def.global
            && let Some(action) = self.global.get(def.name)
        {
            return Some(action.clone());
        }
        local.get(def.name).cloned()
    }
}

impl<A: Clone> Default for ShortcutDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}
