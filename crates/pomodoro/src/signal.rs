//! Process-wide interrupt flag
//!
//! `install` registers the platform's interrupt handler once at startup:
//! SIGINT/SIGTERM on Unix, a console control handler on Windows. The handler
//! only flips an atomic; the sleeping clock notices it and unwinds the session
//! loop with `PomodoroError::Interrupted`.
//!
//! While the keyboard is in raw mode Ctrl-C does not raise a signal at all and
//! arrives as a key event instead, so the flag covers the time outside raw
//! mode and signals sent from outside the terminal.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn handle_interrupt(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the interrupt handlers. Call once, before the session loop.
#[cfg(unix)]
pub fn install() -> Result<()> {
    for signum in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: handle_interrupt only stores to an atomic, which is
        // async-signal-safe.
        let handler = handle_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        if unsafe { libc::signal(signum, handler) } == libc::SIG_ERR {
            return Err(std::io::Error::last_os_error().into());
        }
    }
    tracing::debug!("interrupt handlers installed");
    Ok(())
}

#[cfg(windows)]
unsafe extern "system" fn handle_console_ctrl(ctrl_type: u32) -> windows::Win32::Foundation::BOOL {
    use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_CLOSE_EVENT, CTRL_C_EVENT};

    let handled = matches!(ctrl_type, CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT);
    if handled {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }
    handled.into()
}

/// Install the interrupt handler. Call once, before the session loop.
#[cfg(windows)]
pub fn install() -> Result<()> {
    use windows::Win32::Foundation::BOOL;
    use windows::Win32::System::Console::SetConsoleCtrlHandler;

    // SAFETY: handle_console_ctrl only stores to an atomic.
    unsafe { SetConsoleCtrlHandler(Some(handle_console_ctrl), BOOL::from(true)) }
        .map_err(std::io::Error::other)?;
    tracing::debug!("console control handler installed");
    Ok(())
}

#[cfg(not(any(unix, windows)))]
pub fn install() -> Result<()> {
    tracing::debug!("no interrupt handler on this platform");
    Ok(())
}

/// Whether an interrupt has been received
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(all(test, any(unix, windows)))]
fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}
