//! Arithmetic operators for the engine
//!
//! The keypad only ever offers four operators, so they are a closed enum and
//! there is no "unknown operator" state once a value exists.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// One of the four keypad operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (x)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the symbol printed on the key
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => 'x',
            Self::Divide => '/',
        }
    }

    /// Parses a key symbol. `*` is accepted as an alias for `x`.
    pub fn from_symbol(symbol: char) -> CalcResult<Self> {
        match symbol {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            'x' | 'X' | '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(CalcError::UnknownOperator(other)),
        }
    }

    /// Applies the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero is not special-cased: it yields an infinity or NaN.
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_symbol(value)
    }
}
