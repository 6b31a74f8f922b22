//! Command-line interface

use clap::Parser;

use pomodoro::Durations;

/// Pomodoro - work/break timer for the terminal
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A simple Pomodoro timer.")]
#[command(version)]
#[command(after_help = r#"KEYS (during a countdown):
    p           Pause / resume
    q           Stop the current phase
    Ctrl-C      Stop the timer

CADENCE:
    Every work session is followed by a short break.
    Every 4th work session is followed by a long break instead.

EXAMPLES:
    pomodoro                    # 25 min work, 5 min short, 15 min long
    pomodoro -w 50 -s 10        # 50 min work, 10 min short break
    pomodoro --long_break 30    # 30 min long break

LOGGING:
    Logs go to stderr. Redirect them while the countdown runs, since raw
    mode breaks their line endings on screen:
    RUST_LOG=pomodoro=debug pomodoro 2> pomodoro.log
"#)]
pub struct Cli {
    /// Work duration in minutes
    #[arg(short, long, value_name = "MINS", default_value_t = 25,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub work: u64,

    /// Short break duration in minutes
    #[arg(short, long = "short_break", visible_alias = "short-break", value_name = "MINS",
          default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub short_break: u64,

    /// Long break duration in minutes
    #[arg(short, long = "long_break", visible_alias = "long-break", value_name = "MINS",
          default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    pub long_break: u64,
}

impl Cli {
    pub fn durations(&self) -> Durations {
        Durations {
            work: self.work,
            short_break: self.short_break,
            long_break: self.long_break,
        }
    }
}
