use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// User command a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Action {
    Quit,

    // Session
    Submit,
    NewInterview,
    ClearInput,

    // History and code blocks
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl Action {
    /// Default footer label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Submit => "Submit",
            Self::NewInterview => "New Interview",
            Self::ClearInput => "Clear",
            Self::ScrollUp => "Scroll Up",
            Self::ScrollDown => "Scroll Down",
            Self::ScrollLeft => "Code Left",
            Self::ScrollRight => "Code Right",
        }
    }
}

/// Key chord bound to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    /// Creates binding shown in the footer bar.
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    /// Keeps the binding out of the footer bar.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        normalize(&self.key) == normalize(key)
    }
}

/// Resolves key presses to actions.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Keybind>,
}

impl Keymap {
    /// Builds keymap from defaults plus user overrides.
    ///
    /// Returns the keymap and the override keys that could not be parsed.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> (Self, Vec<String>) {
        let mut keymap = Self::default();
        let mut invalid = Vec::new();

        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key_str, action) in entries {
            let Some(key) = parse_key(key_str) else {
                invalid.push(key_str.clone());
                continue;
            };
            keymap.bindings.retain(|b| !b.matches(&key));
            keymap
                .bindings
                .insert(0, Keybind::new(key, *action, action.label()));
        }

        (keymap, invalid)
    }

    /// Returns action bound to key, if any.
    #[must_use]
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.matches(key))
            .map(|b| b.action)
    }

    /// Returns visible bindings for the given actions, in action order.
    #[must_use]
    pub fn hints(&self, actions: &[Action]) -> Vec<Keybind> {
        actions
            .iter()
            .filter_map(|action| {
                self.bindings
                    .iter()
                    .find(|b| b.action == *action && b.visible_in_bar)
                    .cloned()
            })
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);

        Self {
            bindings: vec![
                Keybind::new(
                    key(KeyCode::Char('s'), KeyModifiers::CONTROL),
                    Action::Submit,
                    "Submit",
                ),
                Keybind::new(key(KeyCode::Enter, KeyModifiers::ALT), Action::Submit, "Submit")
                    .hidden(),
                Keybind::new(
                    key(KeyCode::Char('n'), KeyModifiers::CONTROL),
                    Action::NewInterview,
                    "New Interview",
                ),
                Keybind::new(
                    key(KeyCode::Char('u'), KeyModifiers::CONTROL),
                    Action::ClearInput,
                    "Clear",
                ),
                Keybind::new(key(KeyCode::PageUp, KeyModifiers::NONE), Action::ScrollUp, "History"),
                Keybind::new(
                    key(KeyCode::PageDown, KeyModifiers::NONE),
                    Action::ScrollDown,
                    "History",
                )
                .hidden(),
                Keybind::new(
                    key(KeyCode::Left, KeyModifiers::ALT),
                    Action::ScrollLeft,
                    "Code",
                ),
                Keybind::new(
                    key(KeyCode::Right, KeyModifiers::ALT),
                    Action::ScrollRight,
                    "Code",
                )
                .hidden(),
                Keybind::new(key(KeyCode::Char('q'), KeyModifiers::CONTROL), Action::Quit, "Quit"),
            ],
        }
    }
}

/// Parses key descriptions such as `Ctrl+s`, `Alt+Enter`, `PageUp` or `F5`.
#[must_use]
pub fn parse_key(input: &str) -> Option<KeyEvent> {
    let input = input.trim();
    let (modifier_part, key_part) = match input.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", input),
    };

    let mut modifiers = KeyModifiers::NONE;
    if !modifier_part.is_empty() {
        for part in modifier_part.split('+') {
            match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
    }

    let code = match key_part.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

fn normalize(key: &KeyEvent) -> (KeyCode, KeyModifiers) {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::SHIFT) => (
            KeyCode::Char(c.to_ascii_uppercase()),
            key.modifiers.difference(KeyModifiers::SHIFT),
        ),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            (KeyCode::Char(c.to_ascii_lowercase()), key.modifiers)
        }
        code => (code, key.modifiers),
    }
}
