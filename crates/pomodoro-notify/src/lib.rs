//! pomodoro-notify - Desktop notifications for the pomodoro timer
//!
//! Works on macOS (osascript/terminal-notifier), Linux (notify-send/kdialog),
//! WSL and Windows (PowerShell toast), with a plain-text fallback.
//!
//! Detect the backend once with [`Backend::detect`] and reuse it for every
//! [`Notification`].

mod backend;

pub use backend::{Backend, Notification, Urgency};

/// Default notification title
pub const DEFAULT_TITLE: &str = "Pomodoro Timer";
