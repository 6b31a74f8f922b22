//! Session orchestrator
//!
//! Drives the endless work/break cycle:
//!
//! ```text
//! loop {
//!     session += 1
//!     Work        (prompt, countdown)
//!     Short Break (prompt, countdown)   sessions 1, 2, 3
//!     Long Break  (prompt, countdown)   every 4th session
//! }
//! ```
//!
//! Only an interrupt ends the loop. Quitting a countdown with `q` moves on to
//! the next phase of the same session.

use std::convert::Infallible;

use crate::console::Console;
use crate::countdown::{run_countdown, Notifier, Outcome};
use crate::display::Tone;
use crate::error::{PomodoroError, Result};
use crate::session::{Durations, Session, SessionKind};

pub const FAREWELL: &str = "Pomodoro timer stopped. Stay productive!";

pub struct Orchestrator {
    console: Console,
    notifier: Box<dyn Notifier>,
    durations: Durations,
    session_index: u64,
}

impl Orchestrator {
    pub fn new(console: Console, notifier: Box<dyn Notifier>, durations: Durations) -> Self {
        Self {
            console,
            notifier,
            durations,
            session_index: 0,
        }
    }

    /// Number of the current (or last started) work session
    pub fn session_index(&self) -> u64 {
        self.session_index
    }

    /// Run sessions until interrupted, then say goodbye.
    ///
    /// This is the one place `Interrupted` is handled; it becomes `Ok(())`.
    pub fn run_until_interrupted(&mut self) -> Result<()> {
        match self.run() {
            Ok(never) => match never {},
            Err(PomodoroError::Interrupted) => {
                tracing::info!(sessions = self.session_index, "interrupted, shutting down");
                self.console.screen.clear()?;
                self.console.screen.line(Tone::Farewell, FAREWELL)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Run sessions forever. Only returns with an error.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            self.run_session()?;
        }
    }

    /// One work phase followed by its break. Returns the break that ran.
    pub fn run_session(&mut self) -> Result<Session> {
        self.session_index += 1;
        let index = self.session_index;

        self.console.screen.clear()?;
        self.console.screen.line(
            Tone::Banner,
            &format!("Session {}: Work for {} minutes.", index, self.durations.work),
        )?;
        self.run_phase(Session::new(index, SessionKind::Work))?;

        let kind = SessionKind::break_after(index);
        let minutes = self.durations.minutes_for(kind);
        let banner = match kind {
            SessionKind::LongBreak => format!("Take a long break for {} minutes.", minutes),
            _ => format!("Take a short break for {} minutes.", minutes),
        };
        self.console.screen.line(Tone::Break, &banner)?;

        let session = Session::new(index, kind);
        self.run_phase(session)?;
        Ok(session)
    }

    fn run_phase(&mut self, session: Session) -> Result<Outcome> {
        let label = session.kind.label();
        let minutes = self.durations.minutes_for(session.kind);

        self.console.prompt_start(label)?;
        tracing::info!(session = session.index, phase = label, minutes, "phase started");

        let outcome = run_countdown(&mut self.console, self.notifier.as_ref(), minutes, label)?;
        // A quit work phase still falls through to its break
        if outcome == Outcome::QuitByUser && !session.kind.is_break() {
            tracing::debug!(session = session.index, "work quit early, continuing to break");
        }
        Ok(outcome)
    }
}
