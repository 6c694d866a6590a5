//! Pure aggregation core for reservation analytics.
//!
//! Everything in this module tree is synchronous and side-effect free:
//! it takes reservation lists and restaurant settings and produces
//! buckets, turns and rates. Data access and HTTP concerns live in the
//! service and api layers.

pub mod buckets;
pub mod occupancy;
pub mod percent;
pub mod period;
pub mod turns;

pub use buckets::{
    canonical_source, group_by_day, group_by_hour, group_by_source, group_by_turn,
    turn_daily_rows, DayBucket, HourBucket, TurnBucket, TurnTotals,
};
pub use occupancy::{
    infer_offset_minutes, occupancy_rate, real_time_occupancy, shift_capacity_figures,
    turn_utc_window, CapacityFigures, RealTimeOccupancy, StatusBreakdown,
};
pub use percent::{normalize_percentages, SourceShare};
pub use period::{
    end_of_local_day, parse_timezone, previous_period, resolve_period, start_of_local_day,
    start_of_local_month, start_of_local_week, Period, DEFAULT_TIMEZONE,
};
pub use turns::{extract_turns, fallback_turns, Turn};
