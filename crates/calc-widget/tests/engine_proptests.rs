//! Property-based tests for the calculator engine
//!
//! Random button sequences must never break the state invariants, and the
//! arithmetic must match plain left-to-right evaluation.

use calc_widget::core::format::group_thousands;
use calc_widget::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any digit
fn digit_strategy() -> impl Strategy<Value = Digit> {
    (0u8..=9u8).prop_map(|d| Digit::new(d).unwrap())
}

/// Generate any operator
fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

/// Generate any keypad action
fn action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        4 => digit_strategy().prop_map(KeypadAction::Digit),
        1 => Just(KeypadAction::Decimal),
        2 => operator_strategy().prop_map(KeypadAction::Operator),
        1 => Just(KeypadAction::Delete),
        1 => Just(KeypadAction::Reset),
        1 => Just(KeypadAction::Equals),
    ]
}

fn run(actions: &[KeypadAction]) -> CalculatorEngine {
    let mut engine = CalculatorEngine::new();
    for action in actions {
        action.dispatch(&mut engine);
    }
    engine
}

fn enter_number(engine: &mut CalculatorEngine, n: u32) {
    for c in n.to_string().chars() {
        engine.enter_digit(Digit::try_from(c).unwrap());
    }
}

// ===== State invariants =====

proptest! {
    /// The display is never empty, holds at most one decimal point, and the
    /// pending fields are set together
    #[test]
    fn prop_state_invariants(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let mut engine = CalculatorEngine::new();
        for action in actions {
            action.dispatch(&mut engine);
            let state = engine.state();
            prop_assert!(!state.display.is_empty());
            prop_assert!(state.display.matches('.').count() <= 1);
            prop_assert_eq!(state.pending_value.is_some(), state.pending_operator.is_some());
        }
    }

    /// Clear always returns to the initial state
    #[test]
    fn prop_clear_resets(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut engine = run(&actions);
        engine.clear();
        prop_assert_eq!(engine.state(), &EngineState::default());
    }

    /// Formatting the display never panics and is stable
    #[test]
    fn prop_display_text_total(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let engine = run(&actions);
        prop_assert_eq!(engine.display_text(), format_for_display(engine.display()));
    }
}

// ===== Text entry =====

proptest! {
    /// Digits from a cleared state concatenate; leading zeros collapse
    #[test]
    fn prop_digits_concatenate(digits in prop::collection::vec(digit_strategy(), 1..25)) {
        let mut engine = CalculatorEngine::new();
        for d in &digits {
            engine.enter_digit(*d);
        }
        let typed: String = digits.iter().map(|d| d.as_char()).collect();
        let trimmed = typed.trim_start_matches('0');
        let expected = if trimmed.is_empty() { "0" } else { trimmed };
        prop_assert_eq!(engine.display(), expected);
    }

    /// Extra decimal presses change nothing
    #[test]
    fn prop_decimal_idempotent(
        digits in prop::collection::vec(digit_strategy(), 0..8),
        extra in 1usize..5,
    ) {
        let mut engine = CalculatorEngine::new();
        for d in &digits {
            engine.enter_digit(*d);
        }
        engine.enter_decimal();
        let once = engine.state().clone();
        for _ in 0..extra {
            engine.enter_decimal();
        }
        prop_assert_eq!(engine.state(), &once);
    }

    /// Backspace drops exactly the last character of a multi-digit entry
    #[test]
    fn prop_backspace_drops_one(n in 10u32..1_000_000) {
        let mut engine = CalculatorEngine::new();
        enter_number(&mut engine, n);
        engine.backspace();
        prop_assert_eq!(engine.display(), (n / 10).to_string());
    }
}

// ===== Arithmetic =====

proptest! {
    /// `a op1 b op2 c =` equals `(a op1 b) op2 c`
    #[test]
    fn prop_left_to_right(
        a in 0u32..1000,
        b in 0u32..1000,
        c in 0u32..1000,
        op1 in operator_strategy(),
        op2 in operator_strategy(),
    ) {
        let mut engine = CalculatorEngine::new();
        enter_number(&mut engine, a);
        engine.set_operator(op1);
        enter_number(&mut engine, b);
        engine.set_operator(op2);
        enter_number(&mut engine, c);
        engine.equals();

        let expected = op2.apply(op1.apply(f64::from(a), f64::from(b)), f64::from(c));
        prop_assert_eq!(engine.display(), number_to_text(expected));
        prop_assert!(engine.state().pending_operator.is_none());
    }

    /// Equals with nothing pending is a no-op
    #[test]
    fn prop_equals_without_pending(n in 0u32..1_000_000, presses in 1usize..4) {
        let mut engine = CalculatorEngine::new();
        enter_number(&mut engine, n);
        let before = engine.state().clone();
        for _ in 0..presses {
            engine.equals();
        }
        prop_assert_eq!(engine.state(), &before);
    }
}

// ===== Display formatting =====

proptest! {
    /// Grouping only inserts commas, every three integer digits
    #[test]
    fn prop_grouping_inserts_commas(n in 0u64..1_000_000_000_000) {
        let text = n.to_string();
        let grouped = format_for_display(&text);
        prop_assert_eq!(grouped.replace(',', ""), text.clone());
        for group in grouped.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// The fraction part is never grouped
    #[test]
    fn prop_grouping_leaves_fraction(int in 0u32..100_000, frac in 0u32..100_000) {
        let text = format!("{int}.{frac}");
        let grouped = group_thousands(&text);
        let fraction = grouped.split('.').nth(1).unwrap();
        prop_assert_eq!(fraction, frac.to_string());
    }

    /// Past twelve characters the display switches to exponential form
    #[test]
    fn prop_long_display_exponential(n in 1_000_000_000_000u64..u64::MAX) {
        let text = n.to_string();
        let shown = format_for_display(&text);
        prop_assert!(shown.contains("e+"), "{} -> {}", text, shown);
        prop_assert!(!shown.contains(','));
    }
}
