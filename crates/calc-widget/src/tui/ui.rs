//! TUI rendering
//!
//! One column, centered: header (title, THEME label, 1/2/3 toggle), the
//! screen, then the keypad. Every color comes from the active palette.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Padding, Paragraph, Widget},
    Frame,
};

use super::app::{CalculatorApp, Focus};
use super::keypad::KeypadWidget;
use crate::theme::{Hsl, Palette, ThemeId};

/// Title shown in the header
pub const TITLE: &str = "calc";

/// Label left of the toggle
pub const THEME_LABEL: &str = "THEME";

/// Toggle knob glyph
pub const KNOB: &str = "●";

/// Widest the calculator column grows
pub const MAX_WIDTH: u16 = 44;

/// Tallest the calculator column grows
pub const MAX_HEIGHT: u16 = 34;

const HEADER_HEIGHT: u16 = 2;
const SCREEN_HEIGHT: u16 = 5;
const SCREEN_PADDING: u16 = 2;
const TOGGLE_WIDTH: u16 = 7;

/// Converts a palette entry to a terminal color
#[must_use]
pub fn color(hsl: Hsl) -> Color {
    let (r, g, b) = hsl.to_rgb();
    Color::Rgb(r, g, b)
}

/// Screen areas of every calculator element. Shared by rendering and mouse
/// hit testing so both agree on where things are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorLayout {
    /// Centered calculator column
    pub body: Rect,
    /// "calc" title
    pub title: Rect,
    /// THEME label
    pub label: Rect,
    /// 1/2/3 numbers over the toggle track
    pub toggle: Rect,
    /// Display screen
    pub screen: Rect,
    /// Keypad grid
    pub keypad: Rect,
}

impl CalculatorLayout {
    /// Computes the layout for a terminal area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let width = area.width.min(MAX_WIDTH);
        let height = area.height.min(MAX_HEIGHT);
        let body = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let [header, screen, keypad] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SCREEN_HEIGHT),
            Constraint::Min(0),
        ])
        .spacing(1)
        .areas(body);

        let [title, label, toggle] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(THEME_LABEL.len() as u16),
            Constraint::Length(TOGGLE_WIDTH),
        ])
        .spacing(1)
        .areas(header);

        Self {
            body,
            title,
            label,
            toggle,
            screen,
            keypad,
        }
    }

    /// Row of the screen that holds the display text
    #[must_use]
    pub const fn screen_text_row(&self) -> u16 {
        self.screen.y + SCREEN_PADDING
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Reads the display text back out of a rendered buffer
#[must_use]
pub fn screen_text(buf: &Buffer, layout: &CalculatorLayout) -> String {
    let row = layout.screen_text_row();
    if layout.screen.height <= SCREEN_PADDING || !buf.area.contains((layout.screen.x, row).into()) {
        return String::new();
    }
    (layout.screen.x..layout.screen.x + layout.screen.width)
        .map(|x| buf[(x, row)].symbol())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub const fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_header(&self, layout: &CalculatorLayout, palette: &Palette, buf: &mut Buffer) {
        let text = Style::default().fg(color(palette.text_display));
        put_last_row(buf, layout.title, TITLE, text.add_modifier(Modifier::BOLD));
        put_last_row(buf, layout.label, THEME_LABEL, text);

        let area = layout.toggle;
        if area.width < TOGGLE_WIDTH || area.height < 2 {
            return;
        }

        let numbers = ThemeId::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        buf.set_string(area.x + 1, area.y, numbers, text);

        let track = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        let mut track_style = Style::default().bg(color(palette.toggle_bg));
        if self.app.focus() == Focus::ThemeToggle {
            track_style = track_style.add_modifier(Modifier::REVERSED);
        }
        buf.set_style(track, track_style);

        let knob_x = area.x + 1 + 2 * u16::from(self.app.theme().number() - 1);
        buf.set_string(
            knob_x,
            track.y,
            KNOB,
            Style::default().fg(color(palette.equals_key_bg)),
        );
    }

    fn render_screen(&self, area: Rect, palette: &Palette, buf: &mut Buffer) {
        Paragraph::new(self.app.display_text())
            .alignment(Alignment::Right)
            .style(
                Style::default()
                    .bg(color(palette.screen_bg))
                    .fg(color(palette.text_display))
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().padding(Padding::new(
                SCREEN_PADDING,
                SCREEN_PADDING,
                SCREEN_PADDING,
                0,
            )))
            .render(area, buf);
    }
}

/// Writes `text` on the bottom row of `area`, clipped to its width
fn put_last_row(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let y = area.y + area.height - 1;
    buf.set_stringn(area.x, y, text, usize::from(area.width), style);
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.app.theme().palette();
        let layout = CalculatorLayout::new(area);

        buf.set_style(area, Style::default().bg(color(palette.main_bg)));

        self.render_header(&layout, palette, buf);
        self.render_screen(layout.screen, palette, buf);

        let focused = match self.app.focus() {
            Focus::Key(index) => Some(index),
            Focus::ThemeToggle => None,
        };
        KeypadWidget::new(self.app.keypad(), self.app.theme())
            .focused(focused)
            .pressed(self.app.pressed())
            .render(layout.keypad, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Digit;
    use crate::keypad::KeypadAction;
    use crate::tui::app::FocusMove;
    use crate::tui::input::KeyAction;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(60, 36);
        Terminal::new(backend).unwrap()
    }

    fn draw(app: &CalculatorApp) -> Buffer {
        let mut terminal = create_test_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn content(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn press(app: &mut CalculatorApp, script: &str) {
        for action in KeypadAction::parse_script(script).unwrap() {
            let index = app.keypad().find_action(action).unwrap();
            app.press_button(index);
        }
    }

    // ===== Layout tests =====

    #[test]
    fn test_layout_centers_column() {
        let layout = CalculatorLayout::new(Rect::new(0, 0, 60, 36));
        assert_eq!(layout.body, Rect::new(8, 1, MAX_WIDTH, MAX_HEIGHT));
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = CalculatorLayout::new(Rect::new(0, 0, 44, 34));
        assert_eq!(layout.title.y, 0);
        assert_eq!(layout.toggle.height, HEADER_HEIGHT);
        assert_eq!(layout.toggle.width, TOGGLE_WIDTH);
        assert_eq!(layout.screen, Rect::new(0, 3, 44, SCREEN_HEIGHT));
        assert_eq!(layout.keypad, Rect::new(0, 9, 44, 25));
        assert_eq!(layout.toggle.x + layout.toggle.width, 44);
    }

    #[test]
    fn test_layout_small_terminal() {
        let layout = CalculatorLayout::new(Rect::new(0, 0, 20, 10));
        assert_eq!(layout.body.width, 20);
        assert!(layout.keypad.y + layout.keypad.height <= 10);
    }

    // ===== Rendering tests =====

    #[test]
    fn test_render_header() {
        let app = CalculatorApp::default();
        let text = content(&draw(&app));
        assert!(text.contains(TITLE));
        assert!(text.contains(THEME_LABEL));
        assert!(text.contains("1 2 3"));
        assert!(text.contains(KNOB));
    }

    #[test]
    fn test_render_initial_screen() {
        let app = CalculatorApp::default();
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        assert_eq!(screen_text(&buf, &layout), "0");
    }

    #[test]
    fn test_render_grouped_display() {
        let mut app = CalculatorApp::default();
        press(&mut app, "1234567");
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        assert_eq!(screen_text(&buf, &layout), "1,234,567");
    }

    #[test]
    fn test_render_display_right_aligned() {
        let mut app = CalculatorApp::default();
        press(&mut app, "42");
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        let last = layout.screen.x + layout.screen.width - 1 - SCREEN_PADDING;
        assert_eq!(buf[(last, layout.screen_text_row())].symbol(), "2");
    }

    #[test]
    fn test_render_exponential_display() {
        let mut app = CalculatorApp::default();
        press(&mut app, "1234567890123");
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        assert_eq!(screen_text(&buf, &layout), "1.234568e+12");
    }

    #[test]
    fn test_render_keypad_labels() {
        let app = CalculatorApp::default();
        let text = content(&draw(&app));
        for label in ["DEL", "RESET", "="] {
            assert!(text.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_render_uses_theme_background() {
        for theme in ThemeId::ALL {
            let app = CalculatorApp::new(theme);
            let buf = draw(&app);
            assert_eq!(buf[(0, 0)].bg, color(theme.palette().main_bg));
        }
    }

    #[test]
    fn test_render_knob_follows_theme() {
        let mut app = CalculatorApp::default();
        let layout = CalculatorLayout::new(Rect::new(0, 0, 60, 36));
        let track_y = layout.toggle.y + 1;
        for number in 1..=3u16 {
            let buf = draw(&app);
            let knob_x = layout.toggle.x + 1 + 2 * (number - 1);
            assert_eq!(buf[(knob_x, track_y)].symbol(), KNOB);
            app.toggle_theme();
        }
    }

    #[test]
    fn test_render_focused_toggle_reversed() {
        let mut app = CalculatorApp::default();
        app.handle_key(KeyAction::Focus(FocusMove::Up));
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        assert!(buf[(layout.toggle.x, layout.toggle.y + 1)]
            .modifier
            .contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let app = CalculatorApp::default();
        let mut terminal = Terminal::new(TestBackend::new(6, 4)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }

    #[test]
    fn test_screen_text_after_digit() {
        let mut app = CalculatorApp::default();
        let index = app
            .keypad()
            .find_action(KeypadAction::Digit(Digit::ALL[8]))
            .unwrap();
        app.press_button(index);
        let buf = draw(&app);
        let layout = CalculatorLayout::new(buf.area);
        assert_eq!(screen_text(&buf, &layout), "8");
    }
}
