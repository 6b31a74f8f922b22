//! Error types for the pomodoro timer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomodoroError {
    /// Ctrl-C, SIGINT or SIGTERM. Caught once, at the top of the session loop.
    #[error("Interrupted")]
    Interrupted,

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Notification failed: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, PomodoroError>;
