//! Calculator engine state machine
//!
//! The engine is a single-writer state struct. The view reads it through
//! [`CalculatorEngine::state`] and [`CalculatorEngine::display_text`] and only
//! changes it through the intent methods below. Operators chain strictly left
//! to right: `6 + 2 x 3 =` is `(6 + 2) x 3`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::format::{format_for_display, number_to_text, parse_operand};
use super::{Digit, Operator};

/// Text shown on a cleared screen
pub const INITIAL_DISPLAY: &str = "0";

/// Everything the engine remembers between key presses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Raw screen text, never empty
    pub display: String,
    /// Left operand captured by the last operator press
    pub pending_value: Option<f64>,
    /// Operator waiting for its right operand
    pub pending_operator: Option<Operator>,
    /// Next digit or decimal point starts a fresh number
    pub awaiting_operand: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            pending_value: None,
            pending_operator: None,
            awaiting_operand: false,
        }
    }
}

/// Four-function calculator engine
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: EngineState,
}

impl CalculatorEngine {
    /// Creates an engine showing `0` with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Raw, unformatted screen text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Screen text as it should be rendered
    #[must_use]
    pub fn display_text(&self) -> String {
        format_for_display(&self.state.display)
    }

    /// Presses a digit key
    pub fn enter_digit(&mut self, digit: Digit) {
        let state = &mut self.state;
        if state.awaiting_operand {
            state.display = digit.to_string();
            state.awaiting_operand = false;
        } else if state.display == INITIAL_DISPLAY {
            state.display = digit.to_string();
        } else {
            state.display.push(digit.as_char());
        }
        trace!(display = %state.display, "digit entered");
    }

    /// Presses the decimal point key. A second press in the same number is
    /// ignored.
    pub fn enter_decimal(&mut self) {
        let state = &mut self.state;
        if state.awaiting_operand {
            state.display = "0.".to_string();
            state.awaiting_operand = false;
        } else if !state.display.contains('.') {
            state.display.push('.');
        }
        trace!(display = %state.display, "decimal point entered");
    }

    /// Removes the last character of the screen text, falling back to `0`
    pub fn backspace(&mut self) {
        let state = &mut self.state;
        if state.display.chars().count() > 1 {
            state.display.pop();
        } else {
            state.display = INITIAL_DISPLAY.to_string();
        }
        trace!(display = %state.display, "backspace");
    }

    /// Resets every field to its initial value
    pub fn clear(&mut self) {
        self.state = EngineState::default();
        trace!("cleared");
    }

    /// Presses an operator key.
    ///
    /// The first press only captures the left operand. Later presses apply
    /// the pending operator to the screen value first and show the result,
    /// so chains evaluate left to right. Pressing two operators in a row
    /// re-applies the pending one to the value on screen.
    pub fn set_operator(&mut self, op: Operator) {
        let operand = parse_operand(&self.state.display);

        match (self.state.pending_value, self.state.pending_operator) {
            (None, _) => {
                self.state.pending_value = Some(operand);
            }
            (Some(left), Some(pending)) => {
                let result = pending.apply(left, operand);
                debug!(%pending, left, right = operand, result, "chained operator applied");
                self.state.display = number_to_text(result);
                self.state.pending_value = Some(result);
            }
            (Some(_), None) => {}
        }

        self.state.pending_operator = Some(op);
        self.state.awaiting_operand = true;
    }

    /// Presses `=`. Does nothing unless an operator is pending; there is no
    /// repeat-last-operation behavior.
    pub fn equals(&mut self) {
        let (Some(left), Some(op)) = (self.state.pending_value, self.state.pending_operator) else {
            trace!("equals with nothing pending");
            return;
        };

        let operand = parse_operand(&self.state.display);
        let result = op.apply(left, operand);
        debug!(%op, left, right = operand, result, "equals");

        self.state.display = number_to_text(result);
        self.state.pending_value = None;
        self.state.pending_operator = None;
        self.state.awaiting_operand = true;
    }
}
