//! pomodoro - Terminal pomodoro timer
//!
//! Alternates work and break phases with a live countdown:
//! - Work, then a short break; every fourth session ends with a long break
//! - `p` pauses and resumes, `q` ends the current phase early
//! - A finished phase rings the bell and sends a desktop notification
//! - Ctrl-C stops the timer and restores the terminal
//!
//! The terminal is reached only through the [`keyboard::Keyboard`],
//! [`display::Screen`] and [`clock::Clock`] traits, bundled in a
//! [`console::Console`].

pub mod clock;
pub mod console;
pub mod countdown;
pub mod display;
pub mod error;
pub mod keyboard;
pub mod orchestrator;
pub mod session;
pub mod signal;

#[cfg(test)]
pub(crate) mod testing;

pub use console::Console;
pub use countdown::{run_countdown, CountdownState, DesktopNotifier, Notifier, Outcome};
pub use error::{PomodoroError, Result};
pub use orchestrator::Orchestrator;
pub use session::{Durations, Session, SessionKind};
