//! The interactive terminal as one bundle: keyboard, screen and clock

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::display::{Screen, TerminalScreen, Tone};
use crate::error::{PomodoroError, Result};
use crate::keyboard::{self, Key, Keyboard, RawModeGuard};

/// How often a prompt checks for Enter
const PROMPT_POLL: Duration = Duration::from_millis(50);

pub struct Console {
    pub keyboard: Box<dyn Keyboard>,
    pub screen: Box<dyn Screen>,
    pub clock: Box<dyn Clock>,
}

impl Console {
    pub fn new(keyboard: Box<dyn Keyboard>, screen: Box<dyn Screen>, clock: Box<dyn Clock>) -> Self {
        Self {
            keyboard,
            screen,
            clock,
        }
    }

    /// Console for the current process' terminal
    pub fn detect() -> Self {
        Self::new(
            keyboard::detect(),
            Box::new(TerminalScreen::new()),
            Box::new(SystemClock::new()),
        )
    }

    /// Ask the user to press Enter before starting `label`.
    ///
    /// Blocks until Enter. Ctrl-C or a signal ends the wait with
    /// `Interrupted`. Non-interactive keyboards wait for a line of input.
    pub fn prompt_start(&mut self, label: &str) -> Result<()> {
        self.screen
            .line(Tone::Prompt, &format!("Press Enter to start {} session...", label))?;

        if !self.keyboard.is_interactive() {
            return self.keyboard.wait_for_line();
        }

        let mut keys = RawModeGuard::acquire(self.keyboard.as_mut())?;
        loop {
            match keys.try_read()? {
                Some(Key::Enter) => return Ok(()),
                Some(Key::Interrupt) => return Err(PomodoroError::Interrupted),
                Some(_) => {}
                None => self.clock.sleep(PROMPT_POLL)?,
            }
        }
    }
}
