//! Session types and the work/break cadence
//!
//! A session is one pass of the outer loop: a work phase followed by either a
//! short or a long break. Every fourth session ends with a long break.

/// Number of work sessions per long break
pub const SESSIONS_PER_LONG_BREAK: u64 = 4;

/// Kind of phase within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Label shown in the countdown and in notifications
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::ShortBreak => "Short Break",
            SessionKind::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, SessionKind::Work)
    }

    /// The break that follows work session `index` (1-based)
    pub fn break_after(index: u64) -> Self {
        if index % SESSIONS_PER_LONG_BREAK == 0 {
            SessionKind::LongBreak
        } else {
            SessionKind::ShortBreak
        }
    }
}

/// One phase of the outer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Work session number, starting at 1
    pub index: u64,
    pub kind: SessionKind,
}

impl Session {
    pub fn new(index: u64, kind: SessionKind) -> Self {
        Self { index, kind }
    }
}

/// Phase lengths in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}

impl Durations {
    pub fn minutes_for(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Work => self.work,
            SessionKind::ShortBreak => self.short_break,
            SessionKind::LongBreak => self.long_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence() {
        use SessionKind::{LongBreak as L, ShortBreak as S};

        let kinds: Vec<_> = (1..=8).map(SessionKind::break_after).collect();
        assert_eq!(kinds, vec![S, S, S, L, S, S, S, L]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SessionKind::Work.label(), "Work");
        assert_eq!(SessionKind::ShortBreak.label(), "Short Break");
        assert_eq!(SessionKind::LongBreak.label(), "Long Break");
        assert!(!SessionKind::Work.is_break());
        assert!(SessionKind::LongBreak.is_break());
    }

    #[test]
    fn test_default_durations() {
        let d = Durations::default();
        assert_eq!(d.minutes_for(SessionKind::Work), 25);
        assert_eq!(d.minutes_for(SessionKind::ShortBreak), 5);
        assert_eq!(d.minutes_for(SessionKind::LongBreak), 15);
    }
}
