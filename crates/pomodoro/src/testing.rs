//! In-memory keyboard, screen, clock and notifier for tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Clock;
use crate::console::Console;
use crate::countdown::Notifier;
use crate::display::{Screen, Tone};
use crate::error::{PomodoroError, Result};
use crate::keyboard::{Key, Keyboard};

#[derive(Debug, Default)]
pub struct KeyboardLog {
    /// Raw mode currently held
    pub raw: bool,
    pub acquisitions: usize,
    pub polls: usize,
}

/// Replays one scripted entry per poll, then reports no key forever
///
/// The leading run of `Some` entries counts as already typed, so
/// `take_interrupt` can pull a Ctrl-C out of it ahead of the keys before it.
pub struct ScriptedKeyboard {
    script: VecDeque<Option<Key>>,
    log: Rc<RefCell<KeyboardLog>>,
}

impl ScriptedKeyboard {
    pub fn new(script: Vec<Option<Key>>) -> Self {
        Self {
            script: script.into(),
            log: Rc::default(),
        }
    }

    pub fn log(&self) -> Rc<RefCell<KeyboardLog>> {
        Rc::clone(&self.log)
    }
}

impl Keyboard for ScriptedKeyboard {
    fn enable_raw(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        assert!(!log.raw, "raw mode acquired twice");
        log.raw = true;
        log.acquisitions += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.log.borrow_mut().raw = false;
        Ok(())
    }

    fn try_read(&mut self) -> Result<Option<Key>> {
        let mut log = self.log.borrow_mut();
        assert!(log.raw, "keyboard polled outside raw mode");
        log.polls += 1;
        Ok(self.script.pop_front().flatten())
    }

    fn take_interrupt(&mut self) -> Result<bool> {
        assert!(self.log.borrow().raw, "keyboard checked outside raw mode");
        let typed = self.script.iter().take_while(|k| k.is_some()).count();
        match self
            .script
            .iter()
            .take(typed)
            .position(|k| *k == Some(Key::Interrupt))
        {
            Some(i) => {
                self.script.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Clear,
    Status(Tone, String),
    Line(Tone, String),
    Bell,
}

#[derive(Default)]
pub struct RecordingScreen {
    events: Rc<RefCell<Vec<ScreenEvent>>>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Rc<RefCell<Vec<ScreenEvent>>> {
        Rc::clone(&self.events)
    }
}

impl Screen for RecordingScreen {
    fn clear(&mut self) -> Result<()> {
        self.events.borrow_mut().push(ScreenEvent::Clear);
        Ok(())
    }

    fn status(&mut self, tone: Tone, text: &str) -> Result<()> {
        self.events
            .borrow_mut()
            .push(ScreenEvent::Status(tone, text.to_string()));
        Ok(())
    }

    fn line(&mut self, tone: Tone, text: &str) -> Result<()> {
        self.events
            .borrow_mut()
            .push(ScreenEvent::Line(tone, text.to_string()));
        Ok(())
    }

    fn bell(&mut self) -> Result<()> {
        self.events.borrow_mut().push(ScreenEvent::Bell);
        Ok(())
    }
}

/// Records sleeps without waiting
#[derive(Default)]
pub struct FakeClock {
    slept: Rc<RefCell<Vec<Duration>>>,
    /// Number of sleeps that succeed before every later one is interrupted
    interrupt_after: Option<usize>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt_after(sleeps: usize) -> Self {
        Self {
            interrupt_after: Some(sleeps),
            ..Self::default()
        }
    }

    pub fn slept(&self) -> Rc<RefCell<Vec<Duration>>> {
        Rc::clone(&self.slept)
    }
}

impl Clock for FakeClock {
    fn sleep(&mut self, duration: Duration) -> Result<()> {
        let mut slept = self.slept.borrow_mut();
        if self.interrupt_after.is_some_and(|n| slept.len() >= n) {
            return Err(PomodoroError::Interrupted);
        }
        slept.push(duration);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<(String, String, u32)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the call, then reports a delivery failure
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String, u32)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, timeout_secs: u32) -> Result<()> {
        self.sent
            .borrow_mut()
            .push((title.to_string(), message.to_string(), timeout_secs));
        if self.fail {
            return Err(PomodoroError::Notification("no notification daemon".to_string()));
        }
        Ok(())
    }
}

/// A console wired to fakes, with handles to inspect them afterwards
pub struct TestConsole {
    pub console: Console,
    pub keys: Rc<RefCell<KeyboardLog>>,
    pub events: Rc<RefCell<Vec<ScreenEvent>>>,
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl TestConsole {
    pub fn new(script: Vec<Option<Key>>) -> Self {
        let keyboard = ScriptedKeyboard::new(script);
        let screen = RecordingScreen::new();
        let clock = FakeClock::new();
        let keys = keyboard.log();
        let events = screen.events();
        let slept = clock.slept();

        Self {
            console: Console::new(Box::new(keyboard), Box::new(screen), Box::new(clock)),
            keys,
            events,
            slept,
        }
    }
}
