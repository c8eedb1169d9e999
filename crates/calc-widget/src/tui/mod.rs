//! Terminal front end for the calculator
//!
//! Renders the engine and keypad with ratatui and maps crossterm events to
//! focus moves, button presses and theme toggles.

mod app;
mod input;
mod keypad;
mod session;
mod ui;

pub use app::{CalculatorApp, Focus, FocusMove};
pub use input::{InputHandler, KeyAction, PointerAction};
pub use keypad::{button_rect, hit_test, KeypadWidget};
pub use session::{restore_terminal, TerminalGuard};
pub use ui::{color, render, screen_text, CalculatorLayout, CalculatorUI};
