use std::io::{self, Stderr};

use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::error::AppResult;

pub(crate) trait TerminalSurface {
    fn size(&self) -> io::Result<Size>;

    fn clear(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>);
}

/// Raw-mode alternate screen on stderr. Stdout stays free for the selected
/// line.
pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    active: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen, EnableFocusChange) {
            cleanup_terminal_enter_failure(None);
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                cleanup_terminal_enter_failure(None);
                return Err(err.into());
            }
        };
        if let Err(err) = terminal.hide_cursor() {
            cleanup_terminal_enter_failure(Some(&mut terminal));
            return Err(err.into());
        }

        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub(crate) fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.active = false;
        Ok(())
    }
}

impl TerminalSurface for TerminalSession {
    fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn cleanup_terminal_enter_failure(terminal: Option<&mut Terminal<CrosstermBackend<Stderr>>>) {
    match terminal {
        Some(terminal) => {
            let _ = execute!(
                terminal.backend_mut(),
                DisableFocusChange,
                LeaveAlternateScreen
            );
        }
        None => {
            let mut stderr = io::stderr();
            let _ = execute!(stderr, DisableFocusChange, LeaveAlternateScreen);
        }
    }

    let _ = disable_raw_mode();
}
