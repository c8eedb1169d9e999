//! calc: four-function calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! calc                      # theme picked from the terminal background
//! calc --theme 3            # start on theme 3
//! calc --config calc.json   # load settings from a JSON file
//! calc -vv --log-file /tmp/calc.log
//! ```
//!
//! Click the keys, or move focus with the arrow keys and press Enter.
//! `q`, Esc or Ctrl+C quits.

use std::io;
use std::process::ExitCode;

use calc_widget::cli::Cli;
use calc_widget::error::AppResult;
use calc_widget::logging;
use calc_widget::theme::{initial_theme, EnvColorScheme};
use calc_widget::tui::{
    render, restore_terminal, CalculatorApp, CalculatorLayout, InputHandler, KeyAction,
    PointerAction, TerminalGuard,
};
use clap::Parser;
use crossterm::{
    event::{self, EnableMouseCapture, Event},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    logging::init(&config)?;

    let theme = match config.theme {
        Some(theme) => theme,
        None => initial_theme(&EnvColorScheme),
    };
    info!(%theme, log_level = config.log_level.as_filter(), "starting calc");

    // Setup terminal; the guard undoes a partial setup too
    enable_raw_mode()?;
    let guard = TerminalGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = CalculatorApp::new(theme);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    if let Err(e) = guard.restore() {
        warn!(error = %e, "terminal restore incomplete");
    }

    info!(display = app.engine().display(), "exiting");
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut CalculatorApp,
) -> AppResult<()> {
    let input_handler = InputHandler::new();

    loop {
        terminal.draw(|f| render(app, f))?;

        match event::read()? {
            Event::Key(key) => match input_handler.handle_key(key) {
                KeyAction::None => {}
                action => app.handle_key(action),
            },
            Event::Mouse(mouse) => match input_handler.handle_mouse(mouse) {
                PointerAction::Click(x, y) => {
                    let size = terminal.size()?;
                    let layout = CalculatorLayout::new(Rect::new(0, 0, size.width, size.height));
                    app.click(&layout, x, y);
                }
                PointerAction::Release => app.release(),
                PointerAction::None => {}
            },
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
