//! Wall-clock sleeping

use std::time::{Duration, Instant};

use crate::error::{PomodoroError, Result};
use crate::signal;

/// Granularity at which a sleep checks for interrupts
const SLICE: Duration = Duration::from_millis(50);

/// Something that can wait for a span of time
pub trait Clock {
    /// Sleep for `duration`, returning `Interrupted` if the process is
    /// interrupted meanwhile.
    fn sleep(&mut self, duration: Duration) -> Result<()>;

    /// Sleep like `sleep`, also stopping with `Interrupted` as soon as
    /// `interrupt` reports true.
    fn sleep_watching(
        &mut self,
        duration: Duration,
        interrupt: &mut dyn FnMut() -> Result<bool>,
    ) -> Result<()> {
        self.sleep(duration)?;
        if interrupt()? {
            return Err(PomodoroError::Interrupted);
        }
        Ok(())
    }
}

/// Real clock backed by `std::thread::sleep`
pub struct SystemClock {
    interrupted: fn() -> bool,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            interrupted: signal::interrupted,
        }
    }

    /// Use a custom interrupt probe instead of the process signal flag
    pub fn with_probe(interrupted: fn() -> bool) -> Self {
        Self { interrupted }
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) -> Result<()> {
        self.sleep_watching(duration, &mut || Ok(false))
    }

    fn sleep_watching(
        &mut self,
        duration: Duration,
        interrupt: &mut dyn FnMut() -> Result<bool>,
    ) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            if (self.interrupted)() || interrupt()? {
                return Err(PomodoroError::Interrupted);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(SLICE.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_waits() {
        let mut clock = SystemClock::with_probe(|| false);
        let start = Instant::now();
        clock.sleep(Duration::from_millis(120)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn test_sleep_interrupted() {
        let mut clock = SystemClock::with_probe(|| true);
        let start = Instant::now();
        let result = clock.sleep(Duration::from_secs(5));
        assert!(matches!(result, Err(PomodoroError::Interrupted)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sleep_watching_stops_early() {
        let mut clock = SystemClock::with_probe(|| false);
        let mut checks = 0;
        let start = Instant::now();
        let result = clock.sleep_watching(Duration::from_secs(5), &mut || {
            checks += 1;
            Ok(checks == 3)
        });
        assert!(matches!(result, Err(PomodoroError::Interrupted)));
        assert_eq!(checks, 3);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
