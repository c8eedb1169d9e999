//! Calculator drivers
//!
//! A driver presses keypad buttons and reads the screen. The behavior
//! checks below are written once against [`CalculatorDriver`] and run
//! against every front end: the bare engine and the rendered TUI.

use crate::core::{CalcResult, CalculatorEngine};
use crate::keypad::KeypadAction;

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use calc_widget::driver::{verify_chaining, CalculatorDriver, EngineDriver};
///
/// let mut driver = EngineDriver::new();
/// driver.enter("12+30=").unwrap();
/// assert_eq!(driver.display_text(), "42");
///
/// driver.clear();
/// verify_chaining(&mut driver).unwrap();
/// ```
pub trait CalculatorDriver {
    /// Presses the button bound to `action`
    fn press(&mut self, action: KeypadAction);

    /// Text currently shown on the screen
    fn display_text(&self) -> String;

    /// Unformatted display text held by the engine
    fn raw_display(&self) -> String;

    /// Presses RESET
    fn clear(&mut self) {
        self.press(KeypadAction::Reset);
    }

    /// Presses one button per script character (see
    /// [`KeypadAction::from_char`]). Nothing is pressed if the script has an
    /// unknown character.
    fn enter(&mut self, script: &str) -> CalcResult<()> {
        for action in KeypadAction::parse_script(script)? {
            self.press(action);
        }
        Ok(())
    }
}

/// Headless driver talking to the engine directly
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: CalculatorEngine,
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, action: KeypadAction) {
        action.dispatch(&mut self.engine);
    }

    fn display_text(&self) -> String {
        self.engine.display_text()
    }

    fn raw_display(&self) -> String {
        self.engine.display().to_string()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
    use tracing::warn;

    use super::CalculatorDriver;
    use crate::keypad::KeypadAction;
    use crate::theme::ThemeId;
    use crate::tui::{button_rect, screen_text, CalculatorApp, CalculatorLayout, CalculatorUI};

    /// Terminal size the driver renders into
    pub const DRIVER_AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 44,
        height: 34,
    };

    /// Drives the TUI the way a user does: clicks land on rendered button
    /// positions and the screen is read back from the rendered buffer.
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
        area: Rect,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a TUI driver with the default theme
        #[must_use]
        pub fn new() -> Self {
            Self::with_app(CalculatorApp::default())
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                area: DRIVER_AREA,
            }
        }

        /// Creates a TUI driver starting on `theme`
        #[must_use]
        pub fn with_theme(theme: ThemeId) -> Self {
            Self::with_app(CalculatorApp::new(theme))
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Layout for the driver's terminal area
        #[must_use]
        pub fn layout(&self) -> CalculatorLayout {
            CalculatorLayout::new(self.area)
        }

        /// Renders the whole UI into a fresh buffer
        #[must_use]
        pub fn render(&self) -> Buffer {
            let mut buf = Buffer::empty(self.area);
            CalculatorUI::new(&self.app).render(self.area, &mut buf);
            buf
        }

        /// Clicks the theme toggle
        pub fn click_toggle(&mut self) {
            let layout = self.layout();
            self.app.click(&layout, layout.toggle.x, layout.toggle.y);
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: KeypadAction) {
            let layout = self.layout();
            let keypad = self.app.keypad();
            let target = keypad.find_action(action).and_then(|index| {
                let button = keypad.get_button(index)?;
                button_rect(keypad, layout.keypad, button)
            });
            match target {
                Some(rect) => {
                    let x = rect.x + rect.width / 2;
                    let y = rect.y + rect.height / 2;
                    self.app.click(&layout, x, y);
                }
                None => warn!(?action, "no clickable button for action"),
            }
        }

        fn display_text(&self) -> String {
            screen_text(&self.render(), &self.layout())
        }

        fn raw_display(&self) -> String {
            self.app.engine().display().to_string()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behavior checks =====
// Each leaves the driver wherever it ends; most start with RESET.

/// Digits concatenate and a leading zero collapses
pub fn verify_digit_entry<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("007")?;
    assert_eq!(driver.raw_display(), "7");
    driver.enter("12")?;
    assert_eq!(driver.display_text(), "712");
    Ok(())
}

/// Extra decimal points are ignored; a decimal after an operator starts `0.`
pub fn verify_decimal_entry<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("3..1.")?;
    assert_eq!(driver.raw_display(), "3.1");
    driver.enter("+.")?;
    assert_eq!(driver.raw_display(), "0.");
    assert_eq!(driver.display_text(), "0.");
    driver.enter("5=")?;
    assert_eq!(driver.display_text(), "3.6");
    Ok(())
}

/// `6 + 2 x 3 =` is 24: operators apply left to right
pub fn verify_chaining<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("6+2x")?;
    assert_eq!(driver.display_text(), "8");
    driver.enter("3=")?;
    assert_eq!(driver.display_text(), "24");
    Ok(())
}

/// A second operator press re-applies the pending operator
pub fn verify_repeated_operator<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("2+3+")?;
    assert_eq!(driver.display_text(), "5");
    driver.enter("+")?;
    assert_eq!(driver.display_text(), "10");
    Ok(())
}

/// `=` with nothing pending changes nothing
pub fn verify_equals_without_pending<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("42=")?;
    assert_eq!(driver.display_text(), "42");
    driver.enter("=")?;
    assert_eq!(driver.display_text(), "42");
    driver.enter("+1==")?;
    assert_eq!(driver.display_text(), "43");
    Ok(())
}

/// Division by zero shows the IEEE result
pub fn verify_division_by_zero<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("5/0=")?;
    assert_eq!(driver.display_text(), "Infinity");
    driver.clear();
    driver.enter("0/0=")?;
    assert_eq!(driver.display_text(), "NaN");
    Ok(())
}

/// DEL drops one character and bottoms out at `0`
pub fn verify_backspace<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("123<")?;
    assert_eq!(driver.raw_display(), "12");
    driver.enter("<<")?;
    assert_eq!(driver.raw_display(), "0");
    driver.enter("<")?;
    assert_eq!(driver.raw_display(), "0");
    Ok(())
}

/// RESET drops the pending operation too
pub fn verify_reset<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.enter("9+9C")?;
    assert_eq!(driver.display_text(), "0");
    driver.enter("=")?;
    assert_eq!(driver.display_text(), "0");
    driver.enter("4")?;
    assert_eq!(driver.display_text(), "4");
    Ok(())
}

/// Thousands grouping and the exponential switch past 12 characters
pub fn verify_formatting<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.enter("1234567")?;
    assert_eq!(driver.display_text(), "1,234,567");
    driver.clear();
    driver.enter("1234567890123")?;
    assert_eq!(driver.raw_display(), "1234567890123");
    assert_eq!(driver.display_text(), "1.234568e+12");
    Ok(())
}

/// Runs every check in order
pub fn run_all_checks<D: CalculatorDriver + ?Sized>(driver: &mut D) -> CalcResult<()> {
    verify_digit_entry(driver)?;
    verify_decimal_entry(driver)?;
    verify_chaining(driver)?;
    verify_repeated_operator(driver)?;
    verify_equals_without_pending(driver)?;
    verify_division_by_zero(driver)?;
    verify_backspace(driver)?;
    verify_reset(driver)?;
    verify_formatting(driver)
}
