//! Reservation analytics endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::AuthenticatedStaff;

/// Aggregated reservation analytics for one restaurant and period
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Number of reservations in the period
    pub total_reservations: i64,
    /// Guests summed over the period
    pub total_guests: i64,
    /// Mean party size
    pub avg_party_size: f64,
    /// Average share of one day's capacity filled, as a percentage
    pub occupancy_rate: f64,
    /// Percent change against the previous period of the same length
    pub trends: TrendSet,
    /// One entry per calendar day of the period
    pub reservations_by_day: Vec<DayRow>,
    /// Hours of day with at least one reservation
    pub reservations_by_time: Vec<HourRow>,
    /// Daily averages per service turn
    pub reservations_by_turn: Vec<TurnRow>,
    /// Booking channels with integer percentages summing to 100
    pub reservations_by_sources: Vec<SourceRow>,
    /// Today's per-turn headcount and status split
    pub real_time_occupancy: Vec<RealTimeRow>,
}

impl AnalyticsReport {
    /// Report shape returned when the period holds no reservations
    pub fn empty() -> Self {
        Self {
            total_reservations: 0,
            total_guests: 0,
            avg_party_size: 0.0,
            occupancy_rate: 0.0,
            trends: TrendSet::default(),
            reservations_by_day: Vec::new(),
            reservations_by_time: Vec::new(),
            reservations_by_turn: Vec::new(),
            reservations_by_sources: Vec::new(),
            real_time_occupancy: Vec::new(),
        }
    }
}

/// Percent-change figures versus the previous period
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendSet {
    pub reservations: f64,
    pub guests: f64,
    pub avg_party_size: f64,
    /// Always 0; previous-period capacity data is not fetched
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayRow {
    /// Calendar day, YYYY-MM-DD
    pub date: String,
    pub count: i64,
    pub guests: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HourRow {
    /// Hour of day, 0-23
    pub hour: u32,
    pub count: i64,
    pub guests: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TurnRow {
    /// Turn name
    pub turn: String,
    /// Daily average reservation count
    pub count: i64,
    /// Daily average guest count
    pub guests: i64,
    /// One day's covers limit for this turn
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SourceRow {
    /// Booking channel label
    pub source: String,
    pub count: i64,
    /// Integer percentage; all rows together sum to 100
    pub percentage: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeRow {
    pub turn: String,
    pub current_guests: i64,
    pub max_capacity: i32,
    /// Uncapped; values over 100 signal overbooking
    pub percentage: f64,
    pub status_breakdown: StatusCounts,
}

/// Guest totals split by reservation status
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct StatusCounts {
    pub confirmed: i64,
    pub pending: i64,
    pub seated: i64,
    pub finished: i64,
    pub no_show: i64,
}

/// Occupancy snapshot for the turn covering a candidate booking time
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftOccupancy {
    /// False when no restaurant or matching turn was found
    pub found: bool,
    pub turn: Option<String>,
    /// Active covers already booked in the turn's window
    pub current_covers: i64,
    /// The matched turn's own covers limit
    pub max_covers: Option<i32>,
    pub total_capacity: i32,
    /// Seats left against the turn's covers limit
    pub remaining: i64,
    /// Seats left against the whole restaurant
    pub bot_remaining: i64,
    pub utilization_percent: i64,
}

impl ShiftOccupancy {
    /// Result when no restaurant or turn matches; still carries a
    /// capacity figure so callers can display something generic
    pub fn unavailable(total_capacity: i32) -> Self {
        Self {
            found: false,
            turn: None,
            current_covers: 0,
            max_covers: None,
            total_capacity,
            remaining: i64::from(total_capacity),
            bot_remaining: i64::from(total_capacity),
            utilization_percent: 0,
        }
    }
}

/// Query parameters for the analytics report
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AnalyticsQuery {
    /// Period keyword: today, yesterday, this_week, this_month, 7d, 30d or 90d (default: 7d)
    pub period: Option<String>,
}

/// Query parameters for the shift occupancy lookup
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OccupancyQuery {
    /// Candidate booking instant (ISO 8601 / RFC 3339)
    pub datetime: Option<String>,
    /// Local wall-clock time of the booking (HH:MM), for precise turn matching
    pub local_time: Option<String>,
    /// Local calendar date of the booking (YYYY-MM-DD)
    pub local_date: Option<String>,
}

/// Get the reservation analytics report for a period
#[utoipa::path(
    get,
    path = "/restaurants/{id}/analytics",
    tag = "analytics",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID"),
        AnalyticsQuery
    ),
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsReport),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn get_analytics(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsReport>> {
    let report = state
        .services
        .analytics
        .report(id, claims.tenant_id, query.period.as_deref(), Utc::now())
        .await?;
    Ok(Json(report))
}

/// Get occupancy for the turn covering a booking datetime
#[utoipa::path(
    get,
    path = "/restaurants/{id}/occupancy",
    tag = "analytics",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID"),
        OccupancyQuery
    ),
    responses(
        (status = 200, description = "Shift occupancy for the matching turn", body = ShiftOccupancy),
        (status = 400, description = "Missing or malformed datetime")
    )
)]
pub async fn get_shift_occupancy(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Query(query): Query<OccupancyQuery>,
) -> AppResult<Json<ShiftOccupancy>> {
    let datetime = query
        .datetime
        .as_ref()
        .ok_or_else(|| AppError::Validation("datetime is required".to_string()))?;
    let datetime = DateTime::parse_from_rfc3339(datetime)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::Validation("Invalid datetime format. Use ISO 8601 (RFC 3339)".to_string())
        })?;

    let local_time = query
        .local_time
        .as_ref()
        .map(|s| NaiveTime::parse_from_str(s, "%H:%M"))
        .transpose()
        .map_err(|_| AppError::Validation("Invalid local_time format. Use HH:MM".to_string()))?;
    let local_date = query
        .local_date
        .as_ref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::Validation("Invalid local_date format. Use YYYY-MM-DD".to_string()))?;

    let occupancy = state
        .services
        .analytics
        .shift_occupancy(id, claims.tenant_id, datetime, local_date, local_time)
        .await?;
    Ok(Json(occupancy))
}
