//! Time utilities for carlog
//!
//! Provides the wall clock used to evaluate maintenance due dates, a
//! monotonic instant for cache freshness, and the calendar arithmetic the
//! evaluator is built on.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `CARLOG_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for checking how a fleet
//! grades on a given day.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! CARLOG_MOCK_TIME="2025-12-25 14:30:00" carlog-report
//! ```

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "CARLOG_MOCK_TIME";

/// Date format used by the event log's `Date` column
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, "%Y-%m-%d %H:%M:%S") {
                    Ok(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(Local::now().naive_local());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    Err(_) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = "%Y-%m-%d %H:%M:%S",
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local wall-clock time, respecting mock time in debug builds.
///
/// Library code takes the current time as a parameter; only the outermost
/// shell should call this.
pub fn now() -> NaiveDateTime {
    let real_now = Local::now().naive_local();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Parse a log date (`YYYY-MM-DD`)
pub fn parse_log_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), LOG_DATE_FORMAT).ok()
}

/// Format a date the way the event log writes it
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Add whole months to `date` and normalize to the first day of the
/// resulting month. Returns None if the result is out of chrono's range.
pub fn add_months_to_month_start(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .and_then(|d| d.with_day0(0))
}

/// Whole days from `now` until midnight at the start of `due`, rounded
/// toward negative infinity.
///
/// Any time of day past midnight counts as a partial day already elapsed,
/// so a due date one calendar day away at noon is 0 days away.
pub fn days_until(due: NaiveDate, now: NaiveDateTime) -> i64 {
    let whole = (due - now.date()).num_days();
    let time = now.time();
    if time.num_seconds_from_midnight() > 0 || time.nanosecond() > 0 {
        whole - 1
    } else {
        whole
    }
}

/// Represents a point in monotonic time, used for cache time-to-live checks.
/// This is immune to wall-clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Duration since `earlier`, or zero if `earlier` is later than `self`
    pub fn saturating_duration_since(&self, earlier: MonotonicInstant) -> Duration {
        self.0.saturating_duration_since(earlier.0)
    }
}

impl std::ops::Add<Duration> for MonotonicInstant {
    type Output = MonotonicInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        MonotonicInstant(self.0 + rhs)
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
