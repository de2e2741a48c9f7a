use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

use crate::navigator::DEFAULT_DATE;
use crate::source::DEFAULT_ENDPOINT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Page through game days and list the games scheduled on each.
#[derive(Debug, Clone, Parser)]
#[command(name = "nba-games", version)]
pub struct Config {
    /// Games endpoint queried with `?date=<ISO timestamp>`
    #[arg(long, env = "GAMES_ENDPOINT_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// First date shown (YYYY-MM-DD)
    #[arg(long, env = "GAMES_START_DATE", default_value = DEFAULT_DATE, value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// IANA timezone used to decide which day a game belongs to
    #[arg(long, env = "GAMES_TIMEZONE", default_value = "UTC", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Give up on a request after this many seconds; waits indefinitely when unset
    #[arg(long, env = "GAMES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print a status-dependent summary for each game
    #[arg(long)]
    pub detailed: bool,

    /// Load the start date once and exit
    #[arg(long)]
    pub once: bool,

    /// Emit logs as JSON
    #[arg(long, env = "GAMES_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|_| format!("unknown timezone '{}'", s))
}
