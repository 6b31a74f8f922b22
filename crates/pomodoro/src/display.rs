//! Terminal output: the live countdown line, status lines, and the bell
//!
//! Output is written with explicit `\r\n` because the keyboard may have the
//! terminal in raw mode, where a bare `\n` does not return the cursor.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};

use crate::error::Result;

/// What a piece of output means. Mapped to a colour by the terminal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Running countdown frame
    Running,
    Paused,
    Resumed,
    /// Phase stopped by the user
    Stopped,
    Complete,
    /// "Session N: Work for ..." header
    Banner,
    /// "Take a short break ..." header
    Break,
    Prompt,
    Farewell,
}

impl Tone {
    fn color(&self) -> Option<Color> {
        match self {
            Tone::Running => Some(Color::Cyan),
            Tone::Paused => Some(Color::Yellow),
            Tone::Resumed | Tone::Complete => Some(Color::Green),
            Tone::Stopped | Tone::Farewell => Some(Color::Red),
            Tone::Banner => Some(Color::Magenta),
            Tone::Break => Some(Color::Blue),
            Tone::Prompt => None,
        }
    }

    fn bold(&self) -> bool {
        matches!(self, Tone::Banner | Tone::Prompt)
    }
}

/// Where the timer draws
pub trait Screen {
    fn clear(&mut self) -> Result<()>;

    /// Overwrite the current line in place (the live countdown)
    fn status(&mut self, tone: Tone, text: &str) -> Result<()>;

    /// Print a full line below any in-place status line
    fn line(&mut self, tone: Tone, text: &str) -> Result<()>;

    /// Audible alert
    fn bell(&mut self) -> Result<()>;
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Screen backed by stdout
pub struct TerminalScreen {
    out: Stdout,
    /// Stdout is a terminal: enables colour, clearing and line erase
    tty: bool,
    /// A status line is on screen without a trailing newline
    status_open: bool,
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalScreen {
    pub fn new() -> Self {
        let out = io::stdout();
        let tty = out.is_terminal();
        Self {
            out,
            tty,
            status_open: false,
        }
    }

    fn styled(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        if !self.tty {
            return queue!(self.out, Print(text));
        }
        if tone.bold() {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if let Some(color) = tone.color() {
            queue!(self.out, SetForegroundColor(color))?;
        }
        queue!(
            self.out,
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> Result<()> {
        if self.tty {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.status_open = false;
        Ok(())
    }

    fn status(&mut self, tone: Tone, text: &str) -> Result<()> {
        queue!(self.out, Print('\r'))?;
        if self.tty {
            queue!(self.out, Clear(ClearType::CurrentLine))?;
        }
        self.styled(tone, text)?;
        self.out.flush()?;
        self.status_open = true;
        Ok(())
    }

    fn line(&mut self, tone: Tone, text: &str) -> Result<()> {
        if self.status_open {
            queue!(self.out, Print("\r\n"))?;
            self.status_open = false;
        }
        self.styled(tone, text)?;
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        Ok(())
    }

    fn bell(&mut self) -> Result<()> {
        execute!(self.out, Print('\x07'))?;
        Ok(())
    }
}
