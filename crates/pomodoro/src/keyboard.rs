//! Non-blocking keyboard input
//!
//! The countdown needs single keystrokes without waiting for Enter, so the
//! terminal is switched to raw mode for the duration of a phase. Raw mode is
//! held through a [`RawModeGuard`]; dropping the guard restores the previous
//! terminal settings on every exit path, including `?` returns and panics.
//!
//! Raw mode also turns off the terminal's signal keys, so Ctrl-C arrives as
//! [`Key::Interrupt`] rather than SIGINT. [`Keyboard::take_interrupt`] lets a
//! sleeping countdown notice it without waiting for its turn in the key queue.
//!
//! The platform-specific part is selected once by [`detect`].

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, IsTerminal};
use std::ops::{Deref, DerefMut};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::{PomodoroError, Result};

/// A single keystroke as seen by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    /// Ctrl-C while in raw mode
    Interrupt,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('C')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Key::Interrupt
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            _ => Key::Other,
        }
    }
}

/// Source of keystrokes
pub trait Keyboard {
    /// Switch the terminal into raw mode
    fn enable_raw(&mut self) -> Result<()>;

    /// Restore the terminal settings saved by `enable_raw`
    fn restore(&mut self) -> Result<()>;

    /// Return one buffered keystroke, or `None` immediately if there is none
    fn try_read(&mut self) -> Result<Option<Key>>;

    /// Pull a pending Ctrl-C out of the input, leaving every other keystroke
    /// queued for `try_read`. Never blocks.
    fn take_interrupt(&mut self) -> Result<bool> {
        Ok(false)
    }

    /// Whether a human can answer prompts on this keyboard
    fn is_interactive(&self) -> bool {
        true
    }

    /// Block until the user sends a line. Only used when the keyboard is not
    /// interactive.
    fn wait_for_line(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Scoped raw mode. Restores the terminal when dropped.
pub struct RawModeGuard<'a> {
    keyboard: &'a mut dyn Keyboard,
}

impl<'a> RawModeGuard<'a> {
    pub fn acquire(keyboard: &'a mut dyn Keyboard) -> Result<Self> {
        keyboard.enable_raw()?;
        Ok(Self { keyboard })
    }
}

impl<'a> Deref for RawModeGuard<'a> {
    type Target = dyn Keyboard + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.keyboard
    }
}

impl<'a> DerefMut for RawModeGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.keyboard
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.keyboard.restore() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// Keyboard attached to a real terminal, via crossterm
#[derive(Default)]
pub struct TerminalKeyboard {
    /// Keys read while looking for Ctrl-C, not yet handed out
    pending: VecDeque<Key>,
}

/// Next buffered terminal event, without waiting. Anything that is not a key
/// press reads as `Key::Other`.
fn next_event() -> Result<Option<Key>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(Key::from(key))),
        _ => Ok(Some(Key::Other)),
    }
}

impl Keyboard for TerminalKeyboard {
    fn enable_raw(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn try_read(&mut self) -> Result<Option<Key>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }
        match next_event()? {
            Some(Key::Other) => Ok(None),
            key => Ok(key),
        }
    }

    fn take_interrupt(&mut self) -> Result<bool> {
        while let Some(key) = next_event()? {
            match key {
                Key::Interrupt => return Ok(true),
                Key::Other => {}
                key => self.pending.push_back(key),
            }
        }
        Ok(false)
    }
}

/// How often a line wait checks for interrupts
const LINE_POLL: Duration = Duration::from_millis(50);

type LineSource = Box<dyn BufRead + Send>;

/// Keyboard for runs without a terminal on stdin (pipes, CI)
///
/// Never yields a key. Prompts wait for one line of input instead of a
/// keystroke; once the input reaches end of file they stop waiting.
pub struct DetachedKeyboard {
    input: Option<LineSource>,
    /// Fed one message per line by a reader thread, started on first wait
    lines: Option<Receiver<()>>,
    interrupted: fn() -> bool,
}

impl Default for DetachedKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl DetachedKeyboard {
    /// Read lines from stdin, stopping early on a process signal
    pub fn new() -> Self {
        Self::with_input(BufReader::new(std::io::stdin()), crate::signal::interrupted)
    }

    pub fn with_input(input: impl BufRead + Send + 'static, interrupted: fn() -> bool) -> Self {
        Self {
            input: Some(Box::new(input)),
            lines: None,
            interrupted,
        }
    }

    fn lines(&mut self) -> &Receiver<()> {
        let input = &mut self.input;
        self.lines.get_or_insert_with(|| {
            let (tx, rx) = mpsc::channel();
            if let Some(mut input) = input.take() {
                // A blocking read cannot be cancelled, so it lives on its own
                // thread and the prompt waits on the channel instead.
                std::thread::spawn(move || {
                    let mut line = String::new();
                    loop {
                        line.clear();
                        match input.read_line(&mut line) {
                            Ok(0) | Err(_) => break,
                            Ok(_) => {
                                if tx.send(()).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
            rx
        })
    }
}

impl Keyboard for DetachedKeyboard {
    fn enable_raw(&mut self) -> Result<()> {
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        Ok(())
    }

    fn try_read(&mut self) -> Result<Option<Key>> {
        Ok(None)
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn wait_for_line(&mut self) -> Result<()> {
        let interrupted = self.interrupted;
        let lines = self.lines();
        loop {
            if interrupted() {
                return Err(PomodoroError::Interrupted);
            }
            match lines.recv_timeout(LINE_POLL) {
                Ok(()) => return Ok(()),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("input closed, not waiting for prompts");
                    return Ok(());
                }
            }
        }
    }
}

/// Pick the keyboard implementation for this process
pub fn detect() -> Box<dyn Keyboard> {
    if std::io::stdin().is_terminal() {
        Box::new(TerminalKeyboard::default())
    } else {
        tracing::info!("stdin is not a terminal, key commands disabled");
        Box::new(DetachedKeyboard::new())
    }
}
