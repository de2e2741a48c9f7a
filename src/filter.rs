use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use tracing::debug;

use crate::model::GameRecord;

/// Calendar day a game's `DateTime` falls on, as seen in `tz`.
///
/// Timestamps carrying an offset are converted into `tz`; naive timestamps are taken as
/// wall-clock time already in `tz`.
pub fn game_day(date_time: &str, tz: Tz) -> Option<NaiveDate> {
    let s = date_time.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz).date_naive());
    }
    if let Ok(naive) = s.parse::<NaiveDateTime>() {
        return Some(naive.date());
    }
    s.parse::<NaiveDate>().ok()
}

/// Keep only the games scheduled on `day`. Order is preserved.
pub fn games_on_day(records: Vec<GameRecord>, day: NaiveDate, tz: Tz) -> Vec<GameRecord> {
    let before = records.len();
    let kept: Vec<GameRecord> = records
        .into_iter()
        .filter(|game| {
            game.date_time
                .as_deref()
                .and_then(|s| game_day(s, tz))
                .map(|d| d == day)
                .unwrap_or(false)
        })
        .collect();
    debug!(%day, before, after = kept.len(), "Filtered games by day");
    kept
}
