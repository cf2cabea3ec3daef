//! Event handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was not handled.
    Ignored,
    /// Event was consumed.
    Consumed,
    /// Exit application.
    Exit,
}

/// Returns the key press carried by a terminal event.
///
/// Release and repeat events are dropped so each keystroke is handled once.
#[must_use]
pub fn key_press(event: &Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
        _ => None,
    }
}

/// Checks for the quit chord that works regardless of bindings.
#[must_use]
pub fn is_force_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c' | 'C')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_force_quit() {
        assert!(is_force_quit(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_force_quit(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
        assert!(!is_force_quit(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_key_press_filters_releases() {
        let press = make_key_event(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(key_press(&Event::Key(press)), Some(press));

        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_press(&Event::Key(release)), None);
        assert_eq!(key_press(&Event::FocusGained), None);
    }
}
