//! Calculator core: engine state machine, operators and number text
//!
//! Nothing in here performs I/O. The view layer owns a [`CalculatorEngine`]
//! and feeds it validated intents.

pub mod engine;
pub mod format;
mod operations;

pub use engine::{CalculatorEngine, EngineState};
pub use format::{format_for_display, number_to_text, parse_operand};
pub use operations::Operator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for input validation
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised while building validated inputs.
///
/// Engine operations themselves never fail; these only surface when raw
/// numbers or characters are turned into [`Digit`], [`Operator`] or theme
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Digit outside 0-9
    #[error("invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),
    /// Character is not one of the four operator keys
    #[error("unknown operator: {0:?}")]
    UnknownOperator(char),
    /// Theme number outside 1-3
    #[error("invalid theme: {0} (expected 1, 2 or 3)")]
    InvalidTheme(u8),
    /// Character has no keypad button
    #[error("no keypad button for {0:?}")]
    UnknownKey(char),
}

/// A single decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All ten digits in ascending order
    pub const ALL: [Self; 10] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a digit, rejecting values above 9
    pub const fn new(value: u8) -> CalcResult<Self> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(CalcError::InvalidDigit(value))
        }
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the ASCII character for this digit
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }

    /// Iterates over all ten digits in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        value
            .to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(CalcError::UnknownKey(value))
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
