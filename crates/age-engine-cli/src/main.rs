//! `ageclock` — calendar-accurate age and next-birthday countdowns.
//!
//! A thin shell over `age_engine`: each subcommand reads its anchor instant
//! (an explicit flag, or the system clock), calls the engine once, and prints
//! the result. `watch` repeats that on a fixed interval.

mod render;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use age_engine::{AgeClock, Clock, Instant, SystemClock};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ageclock",
    version,
    about = "Calendar-accurate age and next-birthday countdowns",
    long_about = "Instants are YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS[.fff] (read as UTC), \
                  or RFC 3339 with an offset. Set RUST_LOG=debug for diagnostics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Elapsed years, months, days, hours, minutes and seconds since birth
    Age {
        /// Birth instant
        #[arg(long, env = "AGECLOCK_BIRTH")]
        birth: Instant,

        /// Measure up to this instant instead of now
        #[arg(long)]
        at: Option<Instant>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Time left until the next occurrence of a month and day
    Countdown {
        /// Month, 1-12
        month: u32,

        /// Day of month
        day: u32,

        /// Count from this instant instead of now
        #[arg(long)]
        from: Option<Instant>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the next occurrence of a month and day as RFC 3339
    Next {
        /// Month, 1-12
        month: u32,

        /// Day of month
        day: u32,

        /// Search from this instant instead of now
        #[arg(long)]
        from: Option<Instant>,
    },

    /// Print age and next-birthday countdown repeatedly
    Watch {
        /// Birth instant
        #[arg(long, env = "AGECLOCK_BIRTH")]
        birth: Instant,

        /// Milliseconds between refreshes
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many refreshes (default: run until interrupted)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

/// Where "now" comes from for a single command.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    System,
    Fixed(Instant),
}

impl Anchor {
    fn from_flag(flag: Option<Instant>) -> Self {
        flag.map_or(Anchor::System, Anchor::Fixed)
    }
}

impl Clock for Anchor {
    fn now(&self) -> Instant {
        match self {
            Anchor::System => SystemClock.now(),
            Anchor::Fixed(instant) => *instant,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Age { birth, at, json } => {
            let clock = AgeClock::new(Anchor::from_flag(at));
            let age = clock
                .age(birth)
                .with_context(|| format!("computing age since {birth}"))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&age)?)?;
            } else {
                writeln!(out, "{}", render::age_line(&age))?;
            }
        }
        Command::Countdown {
            month,
            day,
            from,
            json,
        } => {
            let clock = AgeClock::new(Anchor::from_flag(from));
            let now = clock.now();
            let next = age_engine::next_occurrence(month, day, &now)
                .with_context(|| format!("finding next {month:02}-{day:02}"))?;
            let left = age_engine::diff(&now, &next)?;
            if json {
                let body = json!({ "from": now, "next": next, "countdown": left });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "{}", render::countdown_line(&left))?;
            }
        }
        Command::Next { month, day, from } => {
            let next = AgeClock::new(Anchor::from_flag(from))
                .next_occurrence(month, day)
                .with_context(|| format!("finding next {month:02}-{day:02}"))?;
            writeln!(out, "{next}")?;
        }
        Command::Watch {
            birth,
            interval_ms,
            ticks,
        } => watch(&mut out, birth, Duration::from_millis(interval_ms), ticks)?,
    }

    Ok(())
}

/// Refresh loop: one engine call per line per tick, no state carried between ticks.
fn watch(out: &mut impl Write, birth: Instant, interval: Duration, ticks: Option<u64>) -> Result<()> {
    let clock = AgeClock::system();
    let mut tick: u64 = 0;

    loop {
        let age = clock.age(birth)?;
        let left = clock.next_birthday_countdown(&birth)?;
        tracing::debug!(tick, now = %clock.now(), "refresh");

        writeln!(out, "{}", render::age_line(&age))?;
        writeln!(out, "{}", render::countdown_line(&left))?;
        out.flush()?;

        tick += 1;
        if ticks.is_some_and(|limit| tick >= limit) {
            return Ok(());
        }
        thread::sleep(interval);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
