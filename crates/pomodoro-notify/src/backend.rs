//! Notification backends for different platforms

use anyhow::{bail, Result};
use std::process::Command;

/// Notification urgency levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

/// A notification to display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    /// Notification title
    pub title: String,
    /// Notification message/body
    pub message: String,
    /// Icon name or path (optional)
    pub icon: Option<String>,
    /// Urgency level
    pub urgency: Urgency,
    /// Auto-dismiss timeout in seconds (optional)
    pub timeout: Option<u32>,
    /// Whether to play a sound
    pub sound: bool,
}

impl Notification {
    /// Create a new notification with the default title
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: crate::DEFAULT_TITLE.to_string(),
            message: message.into(),
            sound: true,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Auto-dismiss after `seconds`
    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Disable sound
    pub fn silent(mut self) -> Self {
        self.sound = false;
        self
    }
}

/// Available notification backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// macOS terminal-notifier
    TerminalNotifier,
    /// macOS osascript
    Osascript,
    /// Linux notify-send
    NotifySend,
    /// KDE kdialog
    Kdialog,
    /// WSL / Windows PowerShell toast
    PowerShell,
    /// Fallback: print to stderr
    Echo,
}

impl Backend {
    /// Detect the best available backend for the current platform
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            if Self::command_exists("terminal-notifier") {
                return Self::TerminalNotifier;
            }
            return Self::Osascript;
        }

        #[cfg(target_os = "linux")]
        {
            if std::env::var("WSL_DISTRO_NAME").is_ok() {
                return Self::PowerShell;
            }
            if Self::command_exists("notify-send") {
                return Self::NotifySend;
            }
            if Self::command_exists("kdialog") {
                return Self::Kdialog;
            }
            return Self::Echo;
        }

        #[cfg(target_os = "windows")]
        {
            return Self::PowerShell;
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            Self::Echo
        }
    }

    fn command_exists(cmd: &str) -> bool {
        Command::new("which")
            .arg(cmd)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get the name of this backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::TerminalNotifier => "terminal-notifier",
            Self::Osascript => "osascript",
            Self::NotifySend => "notify-send",
            Self::Kdialog => "kdialog",
            Self::PowerShell => "powershell",
            Self::Echo => "echo",
        }
    }

    /// Build the external command that delivers `notification`.
    ///
    /// Returns `None` for the echo backend, which needs no child process.
    pub fn command(&self, notification: &Notification) -> Option<Command> {
        match self {
            Self::TerminalNotifier => Some(terminal_notifier(notification)),
            Self::Osascript => Some(osascript(notification)),
            Self::NotifySend => Some(notify_send(notification)),
            Self::Kdialog => Some(kdialog(notification)),
            Self::PowerShell => Some(powershell(notification)),
            Self::Echo => None,
        }
    }

    /// Send a notification using this backend
    pub fn send(&self, notification: &Notification) -> Result<()> {
        let Some(mut cmd) = self.command(notification) else {
            eprintln!("[{}] {}", notification.title, notification.message);
            return Ok(());
        };

        tracing::debug!(backend = self.name(), title = %notification.title, "sending notification");

        let status = cmd.status()?;
        if !status.success() {
            bail!("{} failed with status: {}", self.name(), status);
        }
        Ok(())
    }
}

fn terminal_notifier(notification: &Notification) -> Command {
    let mut cmd = Command::new("terminal-notifier");
    cmd.args([
        "-title",
        &notification.title,
        "-message",
        &notification.message,
        "-group",
        "pomodoro",
    ]);

    if let Some(icon) = &notification.icon {
        cmd.args(["-appIcon", icon]);
    }

    if notification.urgency == Urgency::Critical {
        cmd.args(["-sound", "Basso"]);
    } else if notification.sound {
        cmd.args(["-sound", "default"]);
    }

    cmd
}

fn osascript(notification: &Notification) -> Command {
    let title = notification.title.replace('"', r#"\""#);
    let message = notification.message.replace('"', r#"\""#);

    let mut script = format!(r#"display notification "{}" with title "{}""#, message, title);
    if notification.sound {
        script.push_str(r#" sound name "default""#);
    }

    let mut cmd = Command::new("osascript");
    cmd.args(["-e", &script]);
    cmd
}

fn notify_send(notification: &Notification) -> Command {
    let mut cmd = Command::new("notify-send");
    cmd.args([&notification.title, &notification.message]);

    if let Some(icon) = &notification.icon {
        cmd.args(["--icon", icon]);
    }

    cmd.args(["--urgency", notification.urgency.as_str()]);

    if let Some(timeout) = notification.timeout {
        cmd.args(["--expire-time", &timeout.saturating_mul(1000).to_string()]);
    }

    cmd
}

fn kdialog(notification: &Notification) -> Command {
    let timeout = notification.timeout.unwrap_or(5);

    let mut cmd = Command::new("kdialog");
    cmd.args([
        "--passivepopup",
        &notification.message,
        &timeout.to_string(),
        "--title",
        &notification.title,
    ]);
    cmd
}

fn powershell(notification: &Notification) -> Command {
    // Single quotes are doubled inside PowerShell literals
    let title = notification.title.replace('\'', "''");
    let message = notification.message.replace('\'', "''");

    let script = format!(
        r#"[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null; $template = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); $template.GetElementsByTagName('text')[0].AppendChild($template.CreateTextNode('{}')) | Out-Null; $template.GetElementsByTagName('text')[1].AppendChild($template.CreateTextNode('{}')) | Out-Null; [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('Pomodoro Timer').Show([Windows.UI.Notifications.ToastNotification]::new($template))"#,
        title, message
    );

    let mut cmd = Command::new("powershell.exe");
    cmd.args(["-NoProfile", "-Command", &script]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_builder() {
        let n = Notification::new("Work complete! Time's up!")
            .with_timeout(10)
            .with_urgency(Urgency::Critical)
            .with_icon("alarm-clock")
            .silent();

        assert_eq!(n.title, crate::DEFAULT_TITLE);
        assert_eq!(n.timeout, Some(10));
        assert_eq!(n.urgency, Urgency::Critical);
        assert!(!n.sound);
        assert_eq!(n.icon.as_deref(), Some("alarm-clock"));

        let cmd = Backend::NotifySend.command(&n).unwrap();
        let args = args(&cmd);
        assert!(args.windows(2).any(|w| w == ["--icon", "alarm-clock"]));
        assert!(args.windows(2).any(|w| w == ["--urgency", "critical"]));
    }

    #[test]
    fn test_notify_send_args() {
        let n = Notification::new("Short Break complete! Time's up!").with_timeout(10);
        let cmd = Backend::NotifySend.command(&n).unwrap();

        assert_eq!(cmd.get_program(), "notify-send");
        assert_eq!(
            args(&cmd),
            vec![
                "Pomodoro Timer",
                "Short Break complete! Time's up!",
                "--urgency",
                "normal",
                "--expire-time",
                "10000",
            ]
        );
    }

    #[test]
    fn test_notify_send_huge_timeout() {
        let n = Notification::new("x").with_timeout(u32::MAX);
        let cmd = Backend::NotifySend.command(&n).unwrap();
        let args = args(&cmd);
        assert_eq!(args.last().map(String::as_str), Some("4294967295"));
    }

    #[test]
    fn test_kdialog_default_timeout() {
        let n = Notification::new("hello");
        let cmd = Backend::Kdialog.command(&n).unwrap();
        let args = args(&cmd);
        assert_eq!(args[2], "5");
    }

    #[test]
    fn test_osascript_escapes_quotes() {
        let n = Notification::new(r#"say "hi""#).silent();
        let cmd = Backend::Osascript.command(&n).unwrap();
        let args = args(&cmd);
        let script = &args[1];
        assert!(script.contains(r#"say \"hi\""#));
        assert!(!script.contains("sound name"));
    }

    #[test]
    fn test_echo_has_no_command() {
        assert!(Backend::Echo.command(&Notification::new("x")).is_none());
        assert!(Backend::Echo.send(&Notification::new("x")).is_ok());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(Backend::NotifySend.name(), "notify-send");
        assert_eq!(Backend::PowerShell.name(), "powershell");
    }
}
