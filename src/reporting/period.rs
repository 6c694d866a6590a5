//! Local-day boundary math and named period resolution.
//!
//! All boundaries are computed against a concrete IANA timezone at the
//! instant in question, so periods stay correct across DST transitions.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Business timezone used when a restaurant has no valid timezone of its
/// own, and for resolving named report periods.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Madrid;

/// An inclusive UTC interval covering whole local calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Number of days the period covers: `ceil((end - start) / 1 day)`,
    /// never less than 1
    pub fn day_span(&self) -> i64 {
        const DAY_MS: i64 = 86_400_000;
        let ms = (self.end - self.start).num_milliseconds();
        ((ms + DAY_MS - 1) / DAY_MS).max(1)
    }
}

/// Parse an IANA timezone name, falling back to the business default
/// when the name is missing or invalid
pub fn parse_timezone(tz: &str) -> Tz {
    tz.parse::<Tz>().unwrap_or(DEFAULT_TIMEZONE)
}

/// Resolve a naive local datetime to UTC.
///
/// Ambiguous times (DST fall-back) take the earliest mapping; times in a
/// spring-forward gap resolve to the first valid instant after the gap.
fn resolve_local(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        chrono::LocalResult::None => {
            match tz.from_local_datetime(&(local + Duration::hours(1))) {
                chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
                chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
                chrono::LocalResult::None => Utc.from_utc_datetime(&local),
            }
        }
    }
}

fn local_date_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(NaiveTime::MIN), tz)
}

fn local_date_end(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    resolve_local((date + Duration::days(1)).and_time(NaiveTime::MIN), tz)
        - Duration::milliseconds(1)
}

/// UTC instant of 00:00:00.000 local time on the calendar date `instant`
/// falls on in `tz`
pub fn start_of_local_day(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_date_start(instant.with_timezone(&tz).date_naive(), tz)
}

/// Last millisecond of the local calendar day `instant` falls on in `tz`
pub fn end_of_local_day(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_date_end(instant.with_timezone(&tz).date_naive(), tz)
}

/// Local midnight on the Monday of the local week containing `instant`
pub fn start_of_local_week(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(&tz).date_naive();
    let monday = local - Duration::days(local.weekday().num_days_from_monday() as i64);
    local_date_start(monday, tz)
}

/// Local midnight on the first day of the local month containing `instant`
pub fn start_of_local_month(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(&tz).date_naive();
    local_date_start(local.with_day(1).unwrap_or(local), tz)
}

/// Resolve a named period keyword to a UTC interval of whole local days.
///
/// Unrecognized keywords fall back to the last 7 days.
pub fn resolve_period(keyword: &str, now: DateTime<Utc>, tz: Tz) -> Period {
    match keyword {
        "today" => Period {
            start: start_of_local_day(now, tz),
            end: end_of_local_day(now, tz),
        },
        "yesterday" => {
            let before_today = start_of_local_day(now, tz) - Duration::milliseconds(1);
            Period {
                start: start_of_local_day(before_today, tz),
                end: end_of_local_day(before_today, tz),
            }
        }
        "this_week" => Period {
            start: start_of_local_week(now, tz),
            end: end_of_local_day(now, tz),
        },
        "this_month" => Period {
            start: start_of_local_month(now, tz),
            end: end_of_local_day(now, tz),
        },
        "30d" => last_n_days(30, now, tz),
        "90d" => last_n_days(90, now, tz),
        _ => last_n_days(7, now, tz),
    }
}

fn last_n_days(n: i64, now: DateTime<Utc>, tz: Tz) -> Period {
    let today = now.with_timezone(&tz).date_naive();
    Period {
        start: local_date_start(today - Duration::days(n - 1), tz),
        end: end_of_local_day(now, tz),
    }
}

/// The period of the same day-span immediately before `current`, ending
/// the local day before `current` starts. Used for trend comparisons.
pub fn previous_period(current: &Period, tz: Tz) -> Period {
    let span = current.day_span();
    let last_prior_instant = current.start - Duration::milliseconds(1);
    let prev_last = last_prior_instant.with_timezone(&tz).date_naive();
    let prev_first = prev_last - Duration::days(span - 1);
    Period {
        start: local_date_start(prev_first, tz),
        end: local_date_end(prev_last, tz),
    }
}
