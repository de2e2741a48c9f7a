use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Date shown when no start date is configured, in `YYYY-MM-DD` form.
pub const DEFAULT_DATE: &str = "2025-01-16";

pub fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 16).unwrap_or_default()
}

/// Holds the date currently being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNavigator {
    current: NaiveDate,
}

impl Default for DateNavigator {
    fn default() -> Self {
        Self::new(default_date())
    }
}

impl DateNavigator {
    pub fn new(start: NaiveDate) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// Move the current date by `delta` days, rolling over months and years.
    /// Out-of-range results leave the date where it was.
    pub fn advance_date(&mut self, delta: i64) -> NaiveDate {
        match Duration::try_days(delta).and_then(|d| self.current.checked_add_signed(d)) {
            Some(next) => self.current = next,
            None => warn!(current = %self.current, delta, "Date navigation out of range; ignoring"),
        }
        self.current
    }
}

/// "January 16, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Query value sent to the endpoint: local midnight of `date` in `tz`, as an ISO-8601 UTC instant.
pub fn request_param(date: NaiveDate, tz: Tz) -> String {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    // Midnight can fall in a DST gap; take the first valid instant after it in that case.
    let instant = tz
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
