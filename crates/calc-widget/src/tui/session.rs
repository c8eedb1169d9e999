//! Terminal mode guard
//!
//! Raw mode, the alternate screen and mouse capture must be undone on every
//! exit path, including a setup step that fails halfway.

use std::fmt;
use std::io;

use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use tracing::warn;

/// Runs a restore step exactly once, when dropped or on [`restore`].
///
/// [`restore`]: TerminalGuard::restore
pub struct TerminalGuard<F>
where
    F: FnOnce() -> io::Result<()>,
{
    undo: Option<F>,
}

impl<F> TerminalGuard<F>
where
    F: FnOnce() -> io::Result<()>,
{
    /// Arms the guard with `undo`
    #[must_use]
    pub const fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    /// Runs the restore step now and reports its error
    pub fn restore(mut self) -> io::Result<()> {
        match self.undo.take() {
            Some(undo) => undo(),
            None => Ok(()),
        }
    }
}

impl<F> fmt::Debug for TerminalGuard<F>
where
    F: FnOnce() -> io::Result<()>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalGuard")
            .field("armed", &self.undo.is_some())
            .finish()
    }
}

impl<F> Drop for TerminalGuard<F>
where
    F: FnOnce() -> io::Result<()>,
{
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            if let Err(e) = undo() {
                warn!(error = %e, "terminal restore incomplete");
            }
        }
    }
}

/// Leaves raw mode, the alternate screen and mouse capture on stdout.
///
/// Leaving a mode that was never entered is harmless, so this is safe after
/// a partial setup.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
}
