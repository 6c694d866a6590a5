//! One-pass grouping of reservations into day, hour, turn and source
//! buckets.

use chrono::{Duration, Timelike};
use indexmap::IndexMap;

use crate::models::Reservation;
use crate::reporting::period::Period;
use crate::reporting::turns::Turn;

/// Per-calendar-day totals. Dates are the UTC `YYYY-MM-DD` prefix of the
/// reservation timestamps; turn grouping keys differently, see below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: String,
    pub count: i64,
    pub guests: i64,
}

/// Per-hour totals, only emitted for hours with at least one reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBucket {
    pub hour: u32,
    pub count: i64,
    pub guests: i64,
}

/// Raw per-turn accumulation over the whole period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnTotals {
    pub turn: Turn,
    pub count: i64,
    pub guests: i64,
}

/// Per-turn daily averages as reported to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnBucket {
    pub turn: String,
    pub count: i64,
    pub guests: i64,
    pub capacity: i32,
}

/// Group reservations by UTC calendar day.
///
/// Every date from the period start to its end appears exactly once, in
/// ascending order, even with zero reservations on it.
pub fn group_by_day(reservations: &[Reservation], period: &Period) -> Vec<DayBucket> {
    let mut buckets: IndexMap<String, DayBucket> = IndexMap::new();

    let last = period.end.date_naive();
    let mut date = period.start.date_naive();
    while date <= last {
        let key = date.format("%Y-%m-%d").to_string();
        buckets.insert(
            key.clone(),
            DayBucket {
                date: key,
                count: 0,
                guests: 0,
            },
        );
        date += Duration::days(1);
    }

    for reservation in reservations {
        let key = reservation.starts_at.date_naive().format("%Y-%m-%d").to_string();
        if let Some(bucket) = buckets.get_mut(&key) {
            bucket.count += 1;
            bucket.guests += i64::from(reservation.party_size);
        }
    }

    buckets.into_values().collect()
}

/// Group reservations by UTC hour of day, dropping empty hours
pub fn group_by_hour(reservations: &[Reservation]) -> Vec<HourBucket> {
    let mut counts = [(0i64, 0i64); 24];
    for reservation in reservations {
        let hour = reservation.starts_at.hour() as usize;
        counts[hour].0 += 1;
        counts[hour].1 += i64::from(reservation.party_size);
    }
    (0..24)
        .filter(|&hour| counts[hour].0 > 0)
        .map(|hour| HourBucket {
            hour: hour as u32,
            count: counts[hour].0,
            guests: counts[hour].1,
        })
        .collect()
}

/// Accumulate reservations into turns.
///
/// A reservation lands in the first turn (ascending start hour) whose
/// window contains its hour; reservations matching no turn are dropped
/// from turn aggregates. Matching keys on the UTC hour here; only the
/// real-time and point-query paths convert to the restaurant timezone.
/// Every turn appears in the output even with zero matches.
pub fn group_by_turn(reservations: &[Reservation], turns: &[Turn]) -> Vec<TurnTotals> {
    let mut totals: Vec<TurnTotals> = turns
        .iter()
        .map(|turn| TurnTotals {
            turn: turn.clone(),
            count: 0,
            guests: 0,
        })
        .collect();

    for reservation in reservations {
        let hour = reservation.starts_at.hour();
        if let Some(entry) = totals.iter_mut().find(|t| t.turn.contains_hour(hour)) {
            entry.count += 1;
            entry.guests += i64::from(reservation.party_size);
        }
    }

    totals
}

/// Convert raw turn totals into daily averages, rounded to the nearest
/// whole reservation/guest. Capacity stays a single day's limit.
pub fn turn_daily_rows(totals: &[TurnTotals], period_days: i64) -> Vec<TurnBucket> {
    let days = period_days.max(1);
    totals
        .iter()
        .map(|entry| TurnBucket {
            turn: entry.turn.name.clone(),
            count: round_div(entry.count, days),
            guests: round_div(entry.guests, days),
            capacity: entry.turn.capacity,
        })
        .collect()
}

fn round_div(value: i64, days: i64) -> i64 {
    (value as f64 / days as f64).round() as i64
}

/// Canonical display label for a booking channel
pub fn canonical_source(raw: Option<&str>) -> String {
    match raw {
        None => "Other".to_string(),
        Some(s) if s.trim().is_empty() => "Other".to_string(),
        Some(s) if s.eq_ignore_ascii_case("phone") => "Teléfono".to_string(),
        Some(s) => s.to_string(),
    }
}

/// Count reservations per canonical source label, in first-seen order
pub fn group_by_source(reservations: &[Reservation]) -> IndexMap<String, i64> {
    let mut counts: IndexMap<String, i64> = IndexMap::new();
    for reservation in reservations {
        let label = canonical_source(reservation.source.as_deref());
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}
