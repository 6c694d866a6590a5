//! Occupancy figures: historical rate, per-turn real-time state and the
//! shift point-query window math.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::{Reservation, ReservationStatus};
use crate::reporting::buckets::TurnTotals;
use crate::reporting::turns::Turn;

/// Guest counts per reservation status for one turn today.
///
/// Only these five statuses are broken out; reconfirmed and arrived
/// reservations count toward the aggregate guest total only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub confirmed: i64,
    pub pending: i64,
    pub seated: i64,
    pub finished: i64,
    pub no_show: i64,
}

/// Today's state of one turn
#[derive(Debug, Clone, PartialEq)]
pub struct RealTimeOccupancy {
    pub turn: String,
    pub current_guests: i64,
    pub max_capacity: i32,
    /// Uncapped; values over 100 signal overbooking
    pub percentage: f64,
    pub status_breakdown: StatusBreakdown,
}

/// Remaining-capacity figures for a shift point query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityFigures {
    /// Seats left against the turn's own covers limit
    pub remaining: i64,
    /// Seats left against the whole restaurant, the softer ceiling
    /// quoted to booking bots
    pub bot_remaining: i64,
    pub utilization_percent: i64,
}

/// Average share of one day's capacity filled over the period:
/// `100 * (guests / days) / sum(turn capacity)`, 0 when there is no
/// capacity configured.
pub fn occupancy_rate(totals: &[TurnTotals], period_days: i64) -> f64 {
    let daily_capacity: i64 = totals.iter().map(|t| i64::from(t.turn.capacity)).sum();
    if daily_capacity <= 0 {
        return 0.0;
    }
    let guests: i64 = totals.iter().map(|t| t.guests).sum();
    let avg_daily_guests = guests as f64 / period_days.max(1) as f64;
    100.0 * avg_daily_guests / daily_capacity as f64
}

/// Per-turn occupancy for the restaurant's local today.
///
/// Reservations are matched to turns by their local hour in `tz`; the
/// input list is expected to already exclude cancelled reservations.
pub fn real_time_occupancy(
    reservations: &[Reservation],
    turns: &[Turn],
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<RealTimeOccupancy> {
    let today = now.with_timezone(&tz).date_naive();

    let mut rows: Vec<RealTimeOccupancy> = turns
        .iter()
        .map(|turn| RealTimeOccupancy {
            turn: turn.name.clone(),
            current_guests: 0,
            max_capacity: turn.capacity,
            percentage: 0.0,
            status_breakdown: StatusBreakdown::default(),
        })
        .collect();

    for reservation in reservations {
        let local = reservation.starts_at.with_timezone(&tz);
        if local.date_naive() != today {
            continue;
        }
        let hour = local.hour();
        let Some(idx) = turns.iter().position(|t| t.contains_hour(hour)) else {
            continue;
        };
        let guests = i64::from(reservation.party_size);
        let row = &mut rows[idx];
        row.current_guests += guests;
        match reservation.status {
            ReservationStatus::Confirmed => row.status_breakdown.confirmed += guests,
            ReservationStatus::Pending => row.status_breakdown.pending += guests,
            ReservationStatus::Seated => row.status_breakdown.seated += guests,
            ReservationStatus::Finished => row.status_breakdown.finished += guests,
            ReservationStatus::NoShow => row.status_breakdown.no_show += guests,
            // aggregate only
            ReservationStatus::Reconfirmed
            | ReservationStatus::Arrived
            | ReservationStatus::Cancelled => {}
        }
    }

    for row in &mut rows {
        row.percentage = if row.max_capacity > 0 {
            100.0 * row.current_guests as f64 / f64::from(row.max_capacity)
        } else {
            0.0
        };
    }

    rows
}

/// Infer the local-to-UTC offset in minutes from a supplied local
/// datetime and the UTC instant it describes, clamped to +-12h so a
/// day-boundary mismatch between the two does not produce a whole-day
/// offset.
pub fn infer_offset_minutes(local: NaiveDateTime, utc: DateTime<Utc>) -> i64 {
    let mut offset = (local - utc.naive_utc()).num_minutes();
    if offset > 720 {
        offset -= 1440;
    } else if offset < -720 {
        offset += 1440;
    }
    offset
}

/// UTC interval covering `turn` on the given local date, shifted by the
/// inferred offset. The end bound is exclusive.
pub fn turn_utc_window(
    turn: &Turn,
    local_date: NaiveDate,
    offset_minutes: i64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let base = local_date.and_time(NaiveTime::MIN);
    let start_local = base + Duration::hours(i64::from(turn.start_hour));
    let end_local = base + Duration::hours(i64::from(turn.end_hour));
    let offset = Duration::minutes(offset_minutes);
    (
        Utc.from_utc_datetime(&(start_local - offset)),
        Utc.from_utc_datetime(&(end_local - offset)),
    )
}

/// Remaining capacity and utilization for a prospective booking
pub fn shift_capacity_figures(covers: i64, total_capacity: i32, max_covers: i32) -> CapacityFigures {
    let total = i64::from(total_capacity);
    CapacityFigures {
        remaining: (i64::from(max_covers) - covers).max(0),
        bot_remaining: (total - covers).max(0),
        utilization_percent: if total > 0 {
            (100.0 * covers as f64 / total as f64).round() as i64
        } else {
            0
        },
    }
}
