//! Terminal setup, teardown and event polling

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Interval between ticks that poll delays
    pub tick_rate: Duration,
    entered: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            entered: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    /// Leave the alternate screen and restore the terminal. Also run on Drop.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    /// Next event within `timeout`, or `None` if none arrived
    pub fn next_event(&self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            let event = event::read()?;

            // Key release events arrive on Windows
            if let Event::Key(key) = &event {
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
            }

            Ok(Some(event))
        } else {
            Ok(None)
        }
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Fixed-rate tick schedule, independent of how often events arrive
#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    rate: Duration,
    last: Instant,
}

impl TickSchedule {
    pub fn new(rate: Duration, start: Instant) -> Self {
        Self { rate, last: start }
    }

    /// How long to wait for an event before the next tick is due
    pub fn timeout(&self, now: Instant) -> Duration {
        self.rate
            .checked_sub(now.saturating_duration_since(self.last))
            .unwrap_or(Duration::ZERO)
    }

    /// True once per elapsed interval; restarts the interval when it fires
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.rate {
            self.last = now;
            return true;
        }
        false
    }
}
