//! Lenient parser for the service's `dd/mm/yyyy hh:mm` date strings.
//!
//! Parsing never fails. Missing, empty or non-numeric components take their
//! defaults (day 1, month 1, year 1970, hour 0, minute 0), and out-of-range
//! values roll over into the next unit, so `31/02/2025` lands on 3 March.
//! Values are naive wall-clock points; no timezone is applied.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const DEFAULT_DAY: i64 = 1;
const DEFAULT_MONTH: i64 = 1;
const DEFAULT_YEAR: i64 = 1970;

/// Parse `raw` into a comparable point in time.
pub fn parse_lenient(raw: &str) -> NaiveDateTime {
    let mut halves = raw.split(' ');
    let date_part = halves.next().unwrap_or_default();
    let time_part = halves.next().unwrap_or("00:00");

    let mut date = date_part.split('/');
    let day = component(date.next(), DEFAULT_DAY);
    let month = component(date.next(), DEFAULT_MONTH);
    let year = component(date.next(), DEFAULT_YEAR);

    let mut time = time_part.split(':');
    let hour = component(time.next(), 0);
    let minute = component(time.next(), 0);

    build(year, month, day, hour, minute).unwrap_or_else(epoch)
}

fn component(part: Option<&str>, default: i64) -> i64 {
    part.map(str::trim)
        .filter(|p| !p.is_empty())
        .and_then(|p| p.parse().ok())
        .unwrap_or(default)
}

fn build(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Option<NaiveDateTime> {
    let start_of_year = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    let months_after_january = month.checked_sub(1)?;
    let month_offset = Months::new(u32::try_from(months_after_january.unsigned_abs()).ok()?);
    let first_of_month = if months_after_january >= 0 {
        start_of_year.checked_add_months(month_offset)?
    } else {
        start_of_year.checked_sub_months(month_offset)?
    };
    first_of_month
        .and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)?
        .checked_add_signed(TimeDelta::try_hours(hour)?)?
        .checked_add_signed(TimeDelta::try_minutes(minute)?)
}

fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}
