//! calc-widget: a four-function calculator with a three-theme toggle
//!
//! The engine is a small state machine: digits and the decimal point build
//! the display text, operators chain strictly left to right, and `=` applies
//! whatever is pending. Everything else (keypad layout, themes, the terminal
//! front end) reads engine state and dispatches button presses.
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! for action in KeypadAction::parse_script("6+2x3=").unwrap() {
//!     action.dispatch(&mut engine);
//! }
//! assert_eq!(engine.display_text(), "24");
//!
//! // Theme toggling never touches the engine
//! assert_eq!(ThemeId::One.next().next().next(), ThemeId::One);
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod keypad;
pub mod theme;

#[cfg(feature = "tui")]
pub mod cli;
#[cfg(feature = "tui")]
pub mod logging;
#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, LogLevel};
    pub use crate::core::{
        format_for_display, number_to_text, parse_operand, CalcError, CalcResult,
        CalculatorEngine, Digit, EngineState, Operator,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::error::{AppError, AppResult};
    pub use crate::keypad::{ButtonKind, Keypad, KeypadAction, KeypadButton};
    pub use crate::theme::{
        initial_theme, ColorSchemeProbe, EnvColorScheme, FixedColorScheme, Palette, ThemeId,
    };

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
