//! Keypad layout and button actions
//!
//! Platform-neutral: the TUI renders this grid and the drivers press it.
//! Every button forwards to exactly one engine operation.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, CalculatorEngine, Digit, Operator};

/// What a keypad button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeypadAction {
    /// Enter a digit
    Digit(Digit),
    /// Enter the decimal point
    Decimal,
    /// Press an operator
    Operator(Operator),
    /// Remove the last character (DEL)
    Delete,
    /// Clear everything (RESET)
    Reset,
    /// Evaluate the pending operation
    Equals,
}

impl KeypadAction {
    /// Forwards this press to the engine
    pub fn dispatch(self, engine: &mut CalculatorEngine) {
        match self {
            Self::Digit(d) => engine.enter_digit(d),
            Self::Decimal => engine.enter_decimal(),
            Self::Operator(op) => engine.set_operator(op),
            Self::Delete => engine.backspace(),
            Self::Reset => engine.clear(),
            Self::Equals => engine.equals(),
        }
    }

    /// Returns the label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Reset => "RESET".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// Maps a script character to an action.
    ///
    /// `0-9 . + - x * / =` map to their keys, `C` to RESET and `<` to DEL.
    /// Used to drive the keypad from test scripts and the driver API.
    pub fn from_char(c: char) -> CalcResult<Self> {
        match c {
            '0'..='9' => Digit::try_from(c).map(Self::Digit),
            '.' => Ok(Self::Decimal),
            '=' => Ok(Self::Equals),
            'C' | 'c' => Ok(Self::Reset),
            '<' => Ok(Self::Delete),
            _ => Operator::from_symbol(c)
                .map(Self::Operator)
                .map_err(|_| CalcError::UnknownKey(c)),
        }
    }

    /// Parses a whole script, e.g. `"6+2x3="`. Whitespace is skipped.
    pub fn parse_script(script: &str) -> CalcResult<Vec<Self>> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Self::from_char)
            .collect()
    }

    /// Visual class of the button carrying this action
    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        match self {
            Self::Delete | Self::Reset => ButtonKind::Special,
            Self::Equals => ButtonKind::Equals,
            Self::Digit(_) | Self::Decimal | Self::Operator(_) => ButtonKind::Number,
        }
    }
}

/// Which palette slots a button is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits, decimal point and operators
    Number,
    /// DEL and RESET
    Special,
    /// The `=` key
    Equals,
}

/// A single keypad button definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: KeypadAction,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column of the left edge (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButton {
    /// Creates a single-column button
    #[must_use]
    pub const fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self::wide(action, row, col, 1)
    }

    /// Creates a button covering `span` columns
    #[must_use]
    pub const fn wide(action: KeypadAction, row: usize, col: usize, span: usize) -> Self {
        Self {
            action,
            row,
            col,
            span,
        }
    }

    /// Returns true if the button covers grid cell `(row, col)`
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }
}

/// Keypad layout definition
///
/// ```text
/// [ 7 ] [ 8 ] [ 9 ] [DEL]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ - ]
/// [ . ] [ 0 ] [ / ] [ x ]
/// [  RESET  ] [    =    ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Decimal, Delete, Equals, Operator as Op, Reset};

        let digit = |d: usize| KeypadAction::Digit(Digit::ALL[d]);

        let buttons = vec![
            // Row 0: 7 8 9 DEL
            KeypadButton::new(digit(7), 0, 0),
            KeypadButton::new(digit(8), 0, 1),
            KeypadButton::new(digit(9), 0, 2),
            KeypadButton::new(Delete, 0, 3),
            // Row 1: 4 5 6 +
            KeypadButton::new(digit(4), 1, 0),
            KeypadButton::new(digit(5), 1, 1),
            KeypadButton::new(digit(6), 1, 2),
            KeypadButton::new(Op(Operator::Add), 1, 3),
            // Row 2: 1 2 3 -
            KeypadButton::new(digit(1), 2, 0),
            KeypadButton::new(digit(2), 2, 1),
            KeypadButton::new(digit(3), 2, 2),
            KeypadButton::new(Op(Operator::Subtract), 2, 3),
            // Row 3: . 0 / x
            KeypadButton::new(Decimal, 3, 0),
            KeypadButton::new(digit(0), 3, 1),
            KeypadButton::new(Op(Operator::Divide), 3, 2),
            KeypadButton::new(Op(Operator::Multiply), 3, 3),
            // Row 4: RESET =
            KeypadButton::wide(Reset, 4, 0, 2),
            KeypadButton::wide(Equals, 4, 2, 2),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets the index of the button covering grid cell `(row, col)`
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Gets the button covering grid cell `(row, col)`
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds the index of the button carrying `action`
    #[must_use]
    pub fn find_action(&self, action: KeypadAction) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Presses the button at `index`, returning the action it performed
    pub fn press(&self, index: usize, engine: &mut CalculatorEngine) -> Option<KeypadAction> {
        let action = self.buttons.get(index)?.action;
        action.dispatch(engine);
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> KeypadAction {
        KeypadAction::Digit(Digit::new(d).unwrap())
    }

    // ===== KeypadAction tests =====

    #[test]
    fn test_action_labels() {
        assert_eq!(digit(7).label(), "7");
        assert_eq!(KeypadAction::Decimal.label(), ".");
        assert_eq!(KeypadAction::Operator(Operator::Multiply).label(), "x");
        assert_eq!(KeypadAction::Delete.label(), "DEL");
        assert_eq!(KeypadAction::Reset.label(), "RESET");
        assert_eq!(KeypadAction::Equals.label(), "=");
    }

    #[test]
    fn test_action_kinds() {
        assert_eq!(digit(1).kind(), ButtonKind::Number);
        assert_eq!(KeypadAction::Operator(Operator::Add).kind(), ButtonKind::Number);
        assert_eq!(KeypadAction::Delete.kind(), ButtonKind::Special);
        assert_eq!(KeypadAction::Reset.kind(), ButtonKind::Special);
        assert_eq!(KeypadAction::Equals.kind(), ButtonKind::Equals);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(KeypadAction::from_char('4'), Ok(digit(4)));
        assert_eq!(KeypadAction::from_char('.'), Ok(KeypadAction::Decimal));
        assert_eq!(KeypadAction::from_char('='), Ok(KeypadAction::Equals));
        assert_eq!(KeypadAction::from_char('C'), Ok(KeypadAction::Reset));
        assert_eq!(KeypadAction::from_char('<'), Ok(KeypadAction::Delete));
        assert_eq!(
            KeypadAction::from_char('*'),
            Ok(KeypadAction::Operator(Operator::Multiply))
        );
    }

    #[test]
    fn test_from_char_unknown() {
        assert_eq!(KeypadAction::from_char('('), Err(CalcError::UnknownKey('(')));
        assert_eq!(KeypadAction::from_char('%'), Err(CalcError::UnknownKey('%')));
    }

    #[test]
    fn test_parse_script() {
        let actions = KeypadAction::parse_script("6 + 2 =").unwrap();
        assert_eq!(
            actions,
            vec![
                digit(6),
                KeypadAction::Operator(Operator::Add),
                digit(2),
                KeypadAction::Equals
            ]
        );
        assert!(KeypadAction::parse_script("6 ^ 2").is_err());
    }

    #[test]
    fn test_dispatch_reaches_engine() {
        let mut engine = CalculatorEngine::new();
        for action in KeypadAction::parse_script("12.5<").unwrap() {
            action.dispatch(&mut engine);
        }
        assert_eq!(engine.display(), "12.");
        KeypadAction::Reset.dispatch(&mut engine);
        assert_eq!(engine.display(), "0");
    }

    // ===== Keypad layout tests =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_count(), 18);
    }

    #[test]
    fn test_keypad_every_action_once() {
        let keypad = Keypad::new();
        let mut expected: Vec<KeypadAction> = Digit::all().map(KeypadAction::Digit).collect();
        expected.extend(Operator::ALL.map(KeypadAction::Operator));
        expected.extend([
            KeypadAction::Decimal,
            KeypadAction::Delete,
            KeypadAction::Reset,
            KeypadAction::Equals,
        ]);
        assert_eq!(expected.len(), keypad.button_count());
        for action in expected {
            let count = keypad.buttons().iter().filter(|b| b.action == action).count();
            assert_eq!(count, 1, "{action:?}");
        }
    }

    #[test]
    fn test_keypad_grid_fully_covered() {
        let keypad = Keypad::new();
        let (rows, cols) = keypad.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                assert!(keypad.get_button_at(row, col).is_some(), "({row}, {col})");
            }
        }
    }

    #[test]
    fn test_keypad_positions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(0, 0).unwrap().action, digit(7));
        assert_eq!(keypad.get_button_at(0, 3).unwrap().action, KeypadAction::Delete);
        assert_eq!(keypad.get_button_at(3, 0).unwrap().action, KeypadAction::Decimal);
        assert_eq!(
            keypad.get_button_at(3, 3).unwrap().action,
            KeypadAction::Operator(Operator::Multiply)
        );
    }

    #[test]
    fn test_keypad_wide_buttons() {
        let keypad = Keypad::new();
        assert_eq!(keypad.index_at(4, 0), keypad.index_at(4, 1));
        assert_eq!(keypad.get_button_at(4, 1).unwrap().action, KeypadAction::Reset);
        assert_eq!(keypad.index_at(4, 2), keypad.index_at(4, 3));
        assert_eq!(keypad.get_button_at(4, 3).unwrap().action, KeypadAction::Equals);
    }

    #[test]
    fn test_keypad_out_of_bounds() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
        assert!(keypad.get_button(18).is_none());
    }

    #[test]
    fn test_find_action() {
        let keypad = Keypad::new();
        let idx = keypad.find_action(KeypadAction::Equals).unwrap();
        assert_eq!(keypad.get_button(idx).unwrap().span, 2);
    }

    #[test]
    fn test_press_by_index() {
        let keypad = Keypad::new();
        let mut engine = CalculatorEngine::new();
        let seven = keypad.find_action(digit(7)).unwrap();
        assert_eq!(keypad.press(seven, &mut engine), Some(digit(7)));
        assert_eq!(engine.display(), "7");
        assert_eq!(keypad.press(99, &mut engine), None);
    }

    #[test]
    fn test_button_covers() {
        let btn = KeypadButton::wide(KeypadAction::Equals, 4, 2, 2);
        assert!(btn.covers(4, 2));
        assert!(btn.covers(4, 3));
        assert!(!btn.covers(4, 1));
        assert!(!btn.covers(3, 2));
    }
}
