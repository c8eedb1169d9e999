//! TUI application state
//!
//! Wraps the engine with the view-only state: current theme, keyboard focus,
//! the momentarily pressed button and the quit flag.

use tracing::{debug, info};

use super::input::KeyAction;
use super::keypad::hit_test;
use super::ui::CalculatorLayout;
use crate::core::CalculatorEngine;
use crate::keypad::{Keypad, KeypadAction};
use crate::theme::ThemeId;

/// Element holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Keypad button by index
    Key(usize),
    /// The theme toggle in the header
    ThemeToggle,
}

/// Direction for arrow-key focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// Row above
    Up,
    /// Row below
    Down,
    /// Column to the left
    Left,
    /// Column to the right
    Right,
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: CalculatorEngine,
    keypad: Keypad,
    theme: ThemeId,
    focus: Focus,
    /// Button drawn in its pressed state until the next event
    pressed: Option<usize>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(ThemeId::default())
    }
}

impl CalculatorApp {
    /// Creates the app with a fresh engine and the given starting theme
    #[must_use]
    pub fn new(theme: ThemeId) -> Self {
        Self {
            engine: CalculatorEngine::new(),
            keypad: Keypad::new(),
            theme,
            focus: Focus::Key(0),
            pressed: None,
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the active theme
    #[must_use]
    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    /// Returns the focused element
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the button currently drawn as pressed
    #[must_use]
    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Formatted screen text
    #[must_use]
    pub fn display_text(&self) -> String {
        self.engine.display_text()
    }

    /// Advances to the next theme
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.next();
        info!(theme = %self.theme, "theme toggled");
    }

    /// Presses the keypad button at `index` and focuses it
    pub fn press_button(&mut self, index: usize) -> Option<KeypadAction> {
        let action = self.keypad.press(index, &mut self.engine)?;
        self.pressed = Some(index);
        self.focus = Focus::Key(index);
        debug!(?action, display = self.engine.display(), "button pressed");
        Some(action)
    }

    /// Clears the pressed highlight
    pub fn release(&mut self) {
        self.pressed = None;
    }

    /// Activates whatever has focus
    pub fn activate_focused(&mut self) {
        match self.focus {
            Focus::Key(index) => {
                self.press_button(index);
            }
            Focus::ThemeToggle => self.toggle_theme(),
        }
    }

    /// Moves keyboard focus one step. Moving up from the top keypad row
    /// reaches the theme toggle; moving down from the toggle returns to the
    /// top-right key.
    pub fn move_focus(&mut self, direction: FocusMove) {
        let (rows, cols) = self.keypad.dimensions();
        self.focus = match self.focus {
            Focus::ThemeToggle => match direction {
                FocusMove::Down => self
                    .keypad
                    .index_at(0, cols - 1)
                    .map_or(Focus::ThemeToggle, Focus::Key),
                _ => Focus::ThemeToggle,
            },
            Focus::Key(index) => {
                let Some(button) = self.keypad.get_button(index) else {
                    return;
                };
                let (row, col) = (button.row, button.col);
                let target = match direction {
                    FocusMove::Up if row == 0 => {
                        self.focus = Focus::ThemeToggle;
                        return;
                    }
                    FocusMove::Up => self.keypad.index_at(row - 1, col),
                    FocusMove::Down if row + 1 < rows => self.keypad.index_at(row + 1, col),
                    FocusMove::Left if col > 0 => self.keypad.index_at(row, col - 1),
                    FocusMove::Right => self.keypad.index_at(row, col + button.span),
                    FocusMove::Down | FocusMove::Left => None,
                };
                Focus::Key(target.unwrap_or(index))
            }
        };
    }

    /// Applies a mapped key action
    pub fn handle_key(&mut self, action: KeyAction) {
        self.release();
        match action {
            KeyAction::Focus(direction) => self.move_focus(direction),
            KeyAction::Activate => self.activate_focused(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a left click at terminal cell `(x, y)`
    pub fn click(&mut self, layout: &CalculatorLayout, x: u16, y: u16) {
        self.release();
        if contains(layout.toggle, x, y) {
            self.focus = Focus::ThemeToggle;
            self.toggle_theme();
        } else if let Some(index) = hit_test(&self.keypad, layout.keypad, x, y) {
            self.press_button(index);
        }
    }
}

fn contains(area: ratatui::layout::Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && y >= area.y
        && u32::from(x) < u32::from(area.x) + u32::from(area.width)
        && u32::from(y) < u32::from(area.y) + u32::from(area.height)
}
