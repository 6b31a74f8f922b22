//! Countdown engine
//!
//! Runs one phase: renders the remaining time once per second, polls for a
//! single keystroke after each tick without blocking, and reacts to
//! `p` (pause/resume) and `q` (quit). A phase that runs out rings the bell
//! and sends a desktop notification.
//!
//! Each tick does, in order: one render, one time-accounting step, one
//! one-second sleep, and at most one key reaction. The loop is inclusive of
//! zero, so an uninterrupted `n` minute phase renders `n * 60 + 1` frames and
//! the last one reads `00:00`. Ctrl-C does not wait for its key slot: the
//! sleep watches for it and ends the phase mid-tick.

use std::time::Duration;

use pomodoro_notify::{Backend, Notification};

use crate::console::Console;
use crate::display::{format_clock, Tone};
use crate::error::{PomodoroError, Result};
use crate::keyboard::{Key, RawModeGuard};

/// Length of one tick
pub const TICK: Duration = Duration::from_secs(1);

/// Desktop notification title
pub const NOTIFICATION_TITLE: &str = pomodoro_notify::DEFAULT_TITLE;

/// How long the desktop notification stays up, in seconds
pub const NOTIFICATION_TIMEOUT: u32 = 10;

/// How a phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    QuitByUser,
}

/// What a keystroke did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Paused,
    Resumed,
    Quit,
    Interrupt,
    Ignored,
}

/// Mutable state of one running countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    label: String,
    remaining_seconds: u64,
    paused: bool,
    /// The zero frame has been shown
    expired: bool,
}

impl CountdownState {
    pub fn new(label: impl Into<String>, minutes: u64) -> Self {
        Self {
            label: label.into(),
            remaining_seconds: minutes.saturating_mul(60),
            paused: false,
            expired: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Current frame text
    pub fn frame(&self) -> String {
        let clock = format_clock(self.remaining_seconds);
        if self.paused {
            format!(
                "{} paused at {}. Press 'p' to resume, 'q' to quit.",
                self.label, clock
            )
        } else {
            format!(
                "{}: {}  Press 'p' to pause/resume, 'q' to quit.",
                self.label, clock
            )
        }
    }

    /// Account for one elapsed second. No-op while paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        if self.remaining_seconds == 0 {
            self.expired = true;
        } else {
            self.remaining_seconds -= 1;
        }
    }

    /// Apply a keystroke. Letters are case-insensitive.
    pub fn react(&mut self, key: Key) -> Reaction {
        match key {
            Key::Char(c) => match c.to_ascii_lowercase() {
                'p' => {
                    self.paused = !self.paused;
                    if self.paused {
                        Reaction::Paused
                    } else {
                        Reaction::Resumed
                    }
                }
                'q' => Reaction::Quit,
                _ => Reaction::Ignored,
            },
            Key::Interrupt => Reaction::Interrupt,
            Key::Enter | Key::Other => Reaction::Ignored,
        }
    }
}

/// Receiver of the "phase complete" desktop notification
pub trait Notifier {
    fn notify(&self, title: &str, message: &str, timeout_secs: u32) -> Result<()>;
}

/// Desktop notifications through the platform's notification tool
pub struct DesktopNotifier {
    backend: Backend,
}

impl DesktopNotifier {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Detect the platform backend once
    pub fn detect() -> Self {
        let backend = Backend::detect();
        tracing::debug!(backend = backend.name(), "notification backend selected");
        Self::new(backend)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, timeout_secs: u32) -> Result<()> {
        let notification = Notification::new(message)
            .with_title(title)
            .with_timeout(timeout_secs);
        self.backend
            .send(&notification)
            .map_err(|e| PomodoroError::Notification(e.to_string()))
    }
}

/// Run one phase of `minutes` labelled `label`.
///
/// Raw mode is held for the duration of the loop and released before this
/// returns, whatever the outcome. Ctrl-C or a signal yields `Interrupted`.
pub fn run_countdown(
    console: &mut Console,
    notifier: &dyn Notifier,
    minutes: u64,
    label: &str,
) -> Result<Outcome> {
    let mut state = CountdownState::new(label, minutes);
    tracing::debug!(label, minutes, "countdown started");

    if tick_loop(console, &mut state)? == Outcome::QuitByUser {
        tracing::info!(label, remaining = state.remaining_seconds(), "phase stopped by user");
        return Ok(Outcome::QuitByUser);
    }

    complete(console, notifier, label);
    Ok(Outcome::Completed)
}

fn tick_loop(console: &mut Console, state: &mut CountdownState) -> Result<Outcome> {
    let mut keys = RawModeGuard::acquire(console.keyboard.as_mut())?;
    let screen = console.screen.as_mut();
    let clock = console.clock.as_mut();

    while !state.is_expired() {
        let tone = if state.is_paused() {
            Tone::Paused
        } else {
            Tone::Running
        };
        screen.status(tone, &state.frame())?;
        state.tick();
        clock.sleep_watching(TICK, &mut || keys.take_interrupt())?;

        let Some(key) = keys.try_read()? else {
            continue;
        };
        tracing::debug!(?key, remaining = state.remaining_seconds(), "key pressed");

        match state.react(key) {
            Reaction::Paused => screen.line(
                Tone::Paused,
                &format!("{} paused. Press 'p' to resume, 'q' to quit.", state.label()),
            )?,
            Reaction::Resumed => {
                screen.line(Tone::Resumed, &format!("{} resumed.", state.label()))?
            }
            Reaction::Quit => {
                screen.line(Tone::Stopped, &format!("{} stopped by user.", state.label()))?;
                return Ok(Outcome::QuitByUser);
            }
            Reaction::Interrupt => return Err(PomodoroError::Interrupted),
            Reaction::Ignored => {}
        }
    }

    Ok(Outcome::Completed)
}

/// Completion alerts. Every step is best effort.
fn complete(console: &mut Console, notifier: &dyn Notifier, label: &str) {
    let message = format!("{} complete! Time's up!", label);
    tracing::info!(label, "phase complete");

    if let Err(e) = console.screen.line(Tone::Complete, &message) {
        tracing::warn!(error = %e, "failed to print completion message");
    }
    if let Err(e) = console.screen.bell() {
        tracing::warn!(error = %e, "failed to ring terminal bell");
    }
    if let Err(e) = notifier.notify(NOTIFICATION_TITLE, &message, NOTIFICATION_TIMEOUT) {
        tracing::warn!(error = %e, "desktop notification failed");
    }
}
