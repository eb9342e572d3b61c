//! Week Boundaries
//!
//! Weeks start on Monday. "Today" is resolved in the configured IANA zone,
//! daylight saving included.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use log::warn;

use crate::error::{PlannerError, PlannerResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(back))
}

/// The seven consecutive dates of the week beginning at `week_start`
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    std::array::from_fn(|offset| week_start + Days::new(offset as u64))
}

/// Week start `weeks` weeks away from the week containing `date`
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    week_start(date + TimeDelta::weeks(weeks))
}

/// Strict `YYYY-MM-DD`
pub fn parse_iso_date(input: &str) -> PlannerResult<NaiveDate> {
    let invalid = || PlannerError::InvalidDate { input: input.to_string() };
    if input.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

/// Resolve a timezone identifier, falling back to UTC for unknown names
pub fn resolve_timezone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|_| {
        warn!("Unknown timezone '{name}', using UTC");
        Tz::UTC
    })
}

/// Calendar date of `instant` as seen in `tz`
pub fn date_in(tz: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(tz, Utc::now())
}

pub fn current_week_start(tz: Tz) -> NaiveDate {
    week_start(today_in(tz))
}
