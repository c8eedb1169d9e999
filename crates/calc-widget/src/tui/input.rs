//! Keyboard and mouse input mapping
//!
//! Keys only move focus, activate the focused element or quit. Digits and
//! operators typed on the keyboard are ignored.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::app::FocusMove;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move focus one step
    Focus(FocusMove),
    /// Press the focused button or flip the toggle
    Activate,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Pointer events the app reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Left button went down at `(column, row)`
    Click(u16, u16),
    /// Left button came up
    Release,
    /// Anything else
    None,
}

/// Input handler that maps terminal events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Windows reports releases as separate events
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Up => KeyAction::Focus(FocusMove::Up),
            KeyCode::Down => KeyAction::Focus(FocusMove::Down),
            KeyCode::Left => KeyAction::Focus(FocusMove::Left),
            KeyCode::Right => KeyAction::Focus(FocusMove::Right),
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Activate,
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Maps a mouse event to a pointer action
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> PointerAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerAction::Click(event.column, event.row),
            MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
            _ => PointerAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    // ===== Focus key tests =====

    #[test]
    fn test_handle_arrows() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, FocusMove::Up),
            (KeyCode::Down, FocusMove::Down),
            (KeyCode::Left, FocusMove::Left),
            (KeyCode::Right, FocusMove::Right),
        ];
        for (code, direction) in cases {
            assert_eq!(
                handler.handle_key(key_event(code)),
                KeyAction::Focus(direction)
            );
        }
    }

    // ===== Activation tests =====

    #[test]
    fn test_handle_enter_and_space() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Activate
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char(' '))),
            KeyAction::Activate
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = InputHandler::new();
        let mut event = key_event(KeyCode::Enter);
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key(event), KeyAction::None);
    }

    // ===== Quit tests =====

    #[test]
    fn test_handle_quit_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key_event(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_handle_ctrl_unknown() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x'))),
            KeyAction::None
        );
    }

    // ===== Ignored key tests =====

    #[test]
    fn test_typed_digits_and_operators_ignored() {
        let handler = InputHandler::new();
        for c in ['0', '5', '9', '+', '-', '*', '/', '.', '=', 'c'] {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::None,
                "'{c}' should be ignored"
            );
        }
    }

    #[test]
    fn test_handle_other_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key_event(KeyCode::Tab)), KeyAction::None);
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            KeyAction::None
        );
        assert_eq!(handler.handle_key(key_event(KeyCode::F(1))), KeyAction::None);
    }

    // ===== Mouse tests =====

    #[test]
    fn test_left_click() {
        let handler = InputHandler::new();
        let event = mouse_event(MouseEventKind::Down(MouseButton::Left), 12, 7);
        assert_eq!(handler.handle_mouse(event), PointerAction::Click(12, 7));
    }

    #[test]
    fn test_left_release() {
        let handler = InputHandler::new();
        let event = mouse_event(MouseEventKind::Up(MouseButton::Left), 1, 1);
        assert_eq!(handler.handle_mouse(event), PointerAction::Release);
    }

    #[test]
    fn test_other_mouse_events() {
        let handler = InputHandler::new();
        for kind in [
            MouseEventKind::Down(MouseButton::Right),
            MouseEventKind::Moved,
            MouseEventKind::ScrollUp,
        ] {
            assert_eq!(
                handler.handle_mouse(mouse_event(kind, 0, 0)),
                PointerAction::None
            );
        }
    }
}
