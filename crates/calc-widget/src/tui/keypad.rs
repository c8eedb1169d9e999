//! Keypad widget for the TUI calculator
//!
//! Draws the shared [`Keypad`] layout as raised keys in the active palette
//! and maps mouse positions back to button indices.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::ui::color;
use crate::keypad::{ButtonKind, Keypad, KeypadButton};
use crate::theme::{Hsl, ThemeId};

/// Screen rectangle of a button inside the keypad `area`.
///
/// The area keeps a one-cell margin; keys are separated by a one-cell gap
/// whenever the grid is large enough for it.
#[must_use]
pub fn button_rect(keypad: &Keypad, area: Rect, button: &KeypadButton) -> Option<Rect> {
    let (rows, cols) = keypad.dimensions();
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    let cell_width = inner.width / u16::try_from(cols).ok()?;
    let cell_height = inner.height / u16::try_from(rows).ok()?;
    if cell_width == 0 || cell_height == 0 {
        return None;
    }

    let col = u16::try_from(button.col).ok()?;
    let row = u16::try_from(button.row).ok()?;
    let span = u16::try_from(button.span).ok()?;

    let gap_x = u16::from(cell_width > 2);
    let gap_y = u16::from(cell_height > 1);

    Some(Rect {
        x: inner.x + col * cell_width,
        y: inner.y + row * cell_height,
        width: (cell_width * span).saturating_sub(gap_x),
        height: cell_height - gap_y,
    })
}

/// Converts a click position to a button index
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<usize> {
    keypad.buttons().iter().position(|button| {
        button_rect(keypad, area, button).is_some_and(|rect| {
            x >= rect.x
                && y >= rect.y
                && u32::from(x) < u32::from(rect.x) + u32::from(rect.width)
                && u32::from(y) < u32::from(rect.y) + u32::from(rect.height)
        })
    })
}

/// Face color, shadow color and label color for a button kind
const fn key_colors(kind: ButtonKind, theme: ThemeId) -> (Hsl, Hsl, Hsl) {
    let palette = theme.palette();
    match kind {
        ButtonKind::Number => (palette.key_bg, palette.key_shadow, palette.text_primary),
        ButtonKind::Special => (
            palette.special_key_bg,
            palette.special_key_shadow,
            palette.text_secondary,
        ),
        ButtonKind::Equals => (
            palette.equals_key_bg,
            palette.equals_key_shadow,
            theme.equals_label(),
        ),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    theme: ThemeId,
    focused: Option<usize>,
    pressed: Option<usize>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub const fn new(keypad: &'a Keypad, theme: ThemeId) -> Self {
        Self {
            keypad,
            theme,
            focused: None,
            pressed: None,
        }
    }

    /// Marks the focused button
    #[must_use]
    pub const fn focused(mut self, index: Option<usize>) -> Self {
        self.focused = index;
        self
    }

    /// Marks the button drawn as pressed
    #[must_use]
    pub const fn pressed(mut self, index: Option<usize>) -> Self {
        self.pressed = index;
        self
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(color(self.theme.palette().toggle_bg)));

        for (index, button) in self.keypad.buttons().iter().enumerate() {
            let Some(rect) = button_rect(self.keypad, area, button) else {
                return;
            };
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let (face, shadow, text) = key_colors(button.action.kind(), self.theme);
            let is_pressed = self.pressed == Some(index);

            // A pressed key sinks onto its shadow
            let face_style = Style::default()
                .bg(color(if is_pressed { shadow } else { face }))
                .fg(color(text))
                .add_modifier(Modifier::BOLD);
            buf.set_style(rect, face_style);

            if rect.height > 1 && !is_pressed {
                let shadow_row = Rect {
                    y: rect.y + rect.height - 1,
                    height: 1,
                    ..rect
                };
                buf.set_style(shadow_row, Style::default().bg(color(shadow)));
            }

            let mut label = button.action.label();
            if self.focused == Some(index) {
                label = format!(">{label}<");
            }
            let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            let label_x = rect.x + rect.width.saturating_sub(label_width) / 2;
            let face_rows = if rect.height > 1 && !is_pressed {
                rect.height - 1
            } else {
                rect.height
            };
            let label_y = rect.y + face_rows.saturating_sub(1) / 2;
            let style = if self.focused == Some(index) {
                face_style.add_modifier(Modifier::UNDERLINED)
            } else {
                face_style
            };
            buf.set_stringn(label_x, label_y, label, usize::from(rect.width), style);
        }
    }
}
