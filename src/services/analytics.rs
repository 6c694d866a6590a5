//! Reservation analytics service
//!
//! Orchestrates the report assembly: resolves the requested period,
//! fans out the data fetches, then hands everything to the pure
//! aggregation code in [`crate::reporting`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use uuid::Uuid;

use crate::{
    api::analytics::{
        AnalyticsReport, DayRow, HourRow, RealTimeRow, ShiftOccupancy, SourceRow, StatusCounts,
        TrendSet, TurnRow,
    },
    error::{AppError, AppResult},
    models::{Reservation, RestaurantConfig},
    reporting::{
        extract_turns, group_by_day, group_by_hour, group_by_source, group_by_turn,
        infer_offset_minutes, normalize_percentages, occupancy_rate, parse_timezone,
        previous_period, real_time_occupancy, resolve_period, shift_capacity_figures,
        turn_daily_rows, turn_utc_window, Period, DEFAULT_TIMEZONE,
    },
    repository::Repository,
};

/// Read access the analytics engine needs from the data layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsData: Send + Sync {
    /// Reservations with seating times in `[from, to]`, ascending
    async fn fetch_reservations(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        exclude_cancelled: bool,
    ) -> AppResult<Vec<Reservation>>;

    /// Timezone, capacity and opening hours for a restaurant
    async fn fetch_restaurant_config(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
    ) -> AppResult<RestaurantConfig>;
}

#[async_trait]
impl AnalyticsData for Repository {
    async fn fetch_reservations(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        exclude_cancelled: bool,
    ) -> AppResult<Vec<Reservation>> {
        self.reservations
            .list_in_range(restaurant_id, tenant_id, from, to, exclude_cancelled)
            .await
    }

    async fn fetch_restaurant_config(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
    ) -> AppResult<RestaurantConfig> {
        self.restaurants.get_config(restaurant_id, tenant_id).await
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    data: Arc<dyn AnalyticsData>,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            data: Arc::new(repository),
        }
    }

    /// Create a service over any data source
    pub fn with_data(data: Arc<dyn AnalyticsData>) -> Self {
        Self { data }
    }

    /// Build the full analytics report for a period keyword.
    ///
    /// The three fetches (current period, previous period, restaurant
    /// config) run concurrently. Failure of the current-period fetch
    /// aborts the request; the previous period degrades to an empty
    /// set and the config to defaults, except when the restaurant
    /// itself does not exist.
    pub async fn report(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        period: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<AnalyticsReport> {
        let keyword = period.unwrap_or("7d");
        let current = resolve_period(keyword, now, DEFAULT_TIMEZONE);
        let previous = previous_period(&current, DEFAULT_TIMEZONE);

        let (reservations, previous_reservations, config) = tokio::join!(
            self.data
                .fetch_reservations(restaurant_id, tenant_id, current.start, current.end, true),
            self.data
                .fetch_reservations(restaurant_id, tenant_id, previous.start, previous.end, true),
            self.data.fetch_restaurant_config(restaurant_id, tenant_id),
        );

        let reservations = reservations?;
        let previous_reservations = previous_reservations.unwrap_or_else(|e| {
            tracing::warn!(restaurant_id = %restaurant_id, "previous-period fetch failed, trends will read 0: {}", e);
            Vec::new()
        });
        let config = match config {
            Ok(config) => config,
            Err(AppError::NotFound(msg)) => return Err(AppError::NotFound(msg)),
            Err(e) => {
                tracing::warn!(restaurant_id = %restaurant_id, "config fetch failed, using defaults: {}", e);
                RestaurantConfig::default()
            }
        };

        Ok(build_report(
            &reservations,
            &previous_reservations,
            &config,
            &current,
            now,
        ))
    }

    /// Occupancy of the turn covering a prospective booking datetime.
    ///
    /// A missing restaurant or unmatched turn is not an error here;
    /// callers get a structured result that still carries a capacity
    /// figure.
    pub async fn shift_occupancy(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        datetime: DateTime<Utc>,
        local_date: Option<NaiveDate>,
        local_time: Option<NaiveTime>,
    ) -> AppResult<ShiftOccupancy> {
        let config = match self
            .data
            .fetch_restaurant_config(restaurant_id, tenant_id)
            .await
        {
            Ok(config) => config,
            Err(AppError::NotFound(_)) => {
                return Ok(ShiftOccupancy::unavailable(
                    RestaurantConfig::default().total_capacity,
                ));
            }
            Err(e) => {
                tracing::warn!(restaurant_id = %restaurant_id, "config fetch failed, using defaults: {}", e);
                RestaurantConfig::default()
            }
        };

        let turns = extract_turns(config.opening_hours.as_ref());

        // Precise matching needs both local fields; otherwise we fall
        // back to the UTC hour, which is off by the restaurant's offset.
        let (hour, offset_minutes, date) = match (local_date, local_time) {
            (Some(date), Some(time)) => {
                let local = date.and_time(time);
                (time.hour(), infer_offset_minutes(local, datetime), date)
            }
            _ => (datetime.hour(), 0, datetime.date_naive()),
        };

        let Some(turn) = turns.into_iter().find(|t| t.contains_hour(hour)) else {
            return Ok(ShiftOccupancy::unavailable(config.total_capacity));
        };

        let (start, end) = turn_utc_window(&turn, date, offset_minutes);
        let reservations = self
            .data
            .fetch_reservations(
                restaurant_id,
                tenant_id,
                start,
                end - chrono::Duration::milliseconds(1),
                true,
            )
            .await?;

        let covers: i64 = reservations
            .iter()
            .filter(|r| r.status.is_active())
            .map(|r| i64::from(r.party_size))
            .sum();

        let figures = shift_capacity_figures(covers, config.total_capacity, turn.capacity);

        Ok(ShiftOccupancy {
            found: true,
            turn: Some(turn.name),
            current_covers: covers,
            max_covers: Some(turn.capacity),
            total_capacity: config.total_capacity,
            remaining: figures.remaining,
            bot_remaining: figures.bot_remaining,
            utilization_percent: figures.utilization_percent,
        })
    }
}

/// Percent change between two period totals, 0 when there is no baseline
fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Assemble the report from already-fetched inputs
fn build_report(
    reservations: &[Reservation],
    previous: &[Reservation],
    config: &RestaurantConfig,
    period: &Period,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    if reservations.is_empty() {
        return AnalyticsReport::empty();
    }

    let total_reservations = reservations.len() as i64;
    let total_guests: i64 = reservations.iter().map(|r| i64::from(r.party_size)).sum();
    let avg_party_size = total_guests as f64 / total_reservations as f64;

    let prev_count = previous.len() as i64;
    let prev_guests: i64 = previous.iter().map(|r| i64::from(r.party_size)).sum();
    let prev_avg = if prev_count > 0 {
        prev_guests as f64 / prev_count as f64
    } else {
        0.0
    };

    let days = period.day_span();
    let turns = extract_turns(config.opening_hours.as_ref());
    let turn_totals = group_by_turn(reservations, &turns);
    let sources = group_by_source(reservations);
    let tz = parse_timezone(&config.timezone);

    AnalyticsReport {
        total_reservations,
        total_guests,
        avg_party_size,
        occupancy_rate: occupancy_rate(&turn_totals, days),
        trends: TrendSet {
            reservations: percent_change(total_reservations as f64, prev_count as f64),
            guests: percent_change(total_guests as f64, prev_guests as f64),
            avg_party_size: percent_change(avg_party_size, prev_avg),
            // no previous-period capacity data to compare against
            occupancy_rate: 0.0,
        },
        reservations_by_day: group_by_day(reservations, period)
            .into_iter()
            .map(|b| DayRow {
                date: b.date,
                count: b.count,
                guests: b.guests,
            })
            .collect(),
        reservations_by_time: group_by_hour(reservations)
            .into_iter()
            .map(|b| HourRow {
                hour: b.hour,
                count: b.count,
                guests: b.guests,
            })
            .collect(),
        reservations_by_turn: turn_daily_rows(&turn_totals, days)
            .into_iter()
            .map(|b| TurnRow {
                turn: b.turn,
                count: b.count,
                guests: b.guests,
                capacity: b.capacity,
            })
            .collect(),
        reservations_by_sources: normalize_percentages(&sources)
            .into_iter()
            .map(|s| SourceRow {
                source: s.source,
                count: s.count,
                percentage: s.percentage,
            })
            .collect(),
        real_time_occupancy: real_time_occupancy(reservations, &turns, tz, now)
            .into_iter()
            .map(|o| RealTimeRow {
                turn: o.turn,
                current_guests: o.current_guests,
                max_capacity: o.max_capacity,
                percentage: o.percentage,
                status_breakdown: StatusCounts {
                    confirmed: o.status_breakdown.confirmed,
                    pending: o.status_breakdown.pending,
                    seated: o.status_breakdown.seated,
                    finished: o.status_breakdown.finished,
                    no_show: o.status_breakdown.no_show,
                },
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    fn resv(ts: &str, party_size: i32, status: ReservationStatus) -> Reservation {
        let starts_at: DateTime<Utc> = ts.parse().unwrap();
        Reservation {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            starts_at,
            party_size,
            status,
            source: None,
            customer_name: "Test Guest".to_string(),
            customer_phone: None,
            customer_email: None,
            notes: None,
            created_at: starts_at,
            updated_at: starts_at,
        }
    }

    fn service_with(mock: MockAnalyticsData) -> AnalyticsService {
        AnalyticsService::with_data(Arc::new(mock))
    }

    #[tokio::test]
    async fn report_is_empty_when_period_has_no_reservations() {
        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations()
            .returning(|_, _, _, _, _| Ok(Vec::new()));
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(RestaurantConfig::default()));

        let report = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), Some("7d"), Utc::now())
            .await
            .unwrap();

        assert_eq!(report.total_reservations, 0);
        assert_eq!(report.total_guests, 0);
        assert_eq!(report.avg_party_size, 0.0);
        assert_eq!(report.occupancy_rate, 0.0);
        assert!(report.reservations_by_day.is_empty());
        assert!(report.reservations_by_time.is_empty());
        assert!(report.reservations_by_turn.is_empty());
        assert!(report.reservations_by_sources.is_empty());
        assert!(report.real_time_occupancy.is_empty());
    }

    #[tokio::test]
    async fn report_trends_are_zero_without_a_previous_period() {
        let now: DateTime<Utc> = "2024-06-12T12:00:00Z".parse().unwrap();
        // 7d resolves to 2024-06-05T22:00:00Z onward; anything earlier
        // is the previous-period fetch.
        let cutoff: DateTime<Utc> = "2024-06-05T22:00:00Z".parse().unwrap();

        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, _, _| *from >= cutoff)
            .returning(|_, _, _, _, _| {
                Ok(vec![
                    resv("2024-06-10T18:00:00Z", 4, ReservationStatus::Confirmed),
                    resv("2024-06-11T19:00:00Z", 2, ReservationStatus::Pending),
                ])
            });
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, _, _| *from < cutoff)
            .returning(|_, _, _, _, _| Ok(Vec::new()));
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(RestaurantConfig::default()));

        let report = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), Some("7d"), now)
            .await
            .unwrap();

        assert_eq!(report.total_reservations, 2);
        assert_eq!(report.total_guests, 6);
        assert_eq!(report.trends.reservations, 0.0);
        assert_eq!(report.trends.guests, 0.0);
        assert_eq!(report.trends.avg_party_size, 0.0);
    }

    #[tokio::test]
    async fn report_computes_percent_change_trends() {
        let now: DateTime<Utc> = "2024-06-12T12:00:00Z".parse().unwrap();
        let cutoff: DateTime<Utc> = "2024-06-05T22:00:00Z".parse().unwrap();

        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, _, _| *from >= cutoff)
            .returning(|_, _, _, _, _| {
                Ok(vec![
                    resv("2024-06-10T18:00:00Z", 4, ReservationStatus::Confirmed),
                    resv("2024-06-11T19:00:00Z", 2, ReservationStatus::Confirmed),
                    resv("2024-06-11T20:00:00Z", 3, ReservationStatus::Seated),
                ])
            });
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, _, _| *from < cutoff)
            .returning(|_, _, _, _, _| {
                Ok(vec![
                    resv("2024-06-03T18:00:00Z", 2, ReservationStatus::Confirmed),
                    resv("2024-06-04T19:00:00Z", 2, ReservationStatus::Confirmed),
                ])
            });
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(RestaurantConfig::default()));

        let report = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), Some("7d"), now)
            .await
            .unwrap();

        // 3 vs 2 reservations, 9 vs 4 guests, 3.0 vs 2.0 average
        assert_eq!(report.trends.reservations, 50.0);
        assert_eq!(report.trends.guests, 125.0);
        assert_eq!(report.trends.avg_party_size, 50.0);
        assert_eq!(report.trends.occupancy_rate, 0.0);
    }

    #[tokio::test]
    async fn report_fails_when_primary_fetch_fails() {
        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations()
            .returning(|_, _, _, _, _| Err(AppError::Internal("db down".to_string())));
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(RestaurantConfig::default()));

        let result = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), None, Utc::now())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn report_surfaces_missing_restaurant() {
        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations()
            .returning(|_, _, _, _, _| Ok(vec![resv("2024-06-10T18:00:00Z", 2, ReservationStatus::Confirmed)]));
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Err(AppError::NotFound("Restaurant missing".to_string())));

        let result = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), None, Utc::now())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn report_degrades_to_fallback_turns_when_config_fetch_fails() {
        let now: DateTime<Utc> = "2024-06-12T12:00:00Z".parse().unwrap();

        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_reservations().returning(|_, _, from, _, _| {
            if from >= "2024-06-05T22:00:00Z".parse::<DateTime<Utc>>().unwrap() {
                Ok(vec![resv("2024-06-10T13:00:00Z", 4, ReservationStatus::Confirmed)])
            } else {
                Ok(Vec::new())
            }
        });
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Err(AppError::Internal("timeout".to_string())));

        let report = service_with(mock)
            .report(Uuid::new_v4(), Uuid::new_v4(), Some("7d"), now)
            .await
            .unwrap();

        let names: Vec<&str> = report
            .reservations_by_turn
            .iter()
            .map(|t| t.turn.as_str())
            .collect();
        assert_eq!(names, vec!["Comida", "Cena"]);
    }

    fn weekend_config() -> RestaurantConfig {
        RestaurantConfig {
            timezone: "Europe/Madrid".to_string(),
            total_capacity: 90,
            opening_hours: Some(serde_json::json!({
                "saturday": {
                    "enabled": true,
                    "shifts": [
                        { "name": "Cena", "start": "20:00", "end": "23:00", "maxCovers": 60 }
                    ]
                }
            })),
        }
    }

    #[tokio::test]
    async fn shift_occupancy_queries_the_offset_utc_window() {
        // Local 20:00 on 2024-06-01 supplied as 18:00Z means UTC+2;
        // the 20:00-23:00 turn must be queried as 18:00Z-21:00Z.
        let window_start: DateTime<Utc> = "2024-06-01T18:00:00Z".parse().unwrap();
        let window_end: DateTime<Utc> = "2024-06-01T20:59:59.999Z".parse().unwrap();

        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(weekend_config()));
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, to, _| *from == window_start && *to == window_end)
            .returning(|_, _, _, _, _| {
                Ok(vec![
                    resv("2024-06-01T18:30:00Z", 4, ReservationStatus::Confirmed),
                    resv("2024-06-01T19:00:00Z", 2, ReservationStatus::Pending),
                    resv("2024-06-01T19:30:00Z", 3, ReservationStatus::Finished),
                ])
            });

        let result = service_with(mock)
            .shift_occupancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "2024-06-01T18:00:00Z".parse().unwrap(),
                Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
                Some(NaiveTime::from_hms_opt(20, 0, 0).unwrap()),
            )
            .await
            .unwrap();

        assert!(result.found);
        assert_eq!(result.turn.as_deref(), Some("Cena"));
        // finished is not an active status
        assert_eq!(result.current_covers, 6);
        assert_eq!(result.max_covers, Some(60));
        assert_eq!(result.total_capacity, 90);
        assert_eq!(result.remaining, 54);
        assert_eq!(result.bot_remaining, 84);
        assert_eq!(result.utilization_percent, 7);
    }

    #[tokio::test]
    async fn shift_occupancy_falls_back_to_utc_hour_matching() {
        let window_start: DateTime<Utc> = "2024-06-01T20:00:00Z".parse().unwrap();

        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(weekend_config()));
        mock.expect_fetch_reservations()
            .withf(move |_, _, from, _, _| *from == window_start)
            .returning(|_, _, _, _, _| {
                Ok(vec![resv("2024-06-01T20:30:00Z", 5, ReservationStatus::Confirmed)])
            });

        let result = service_with(mock)
            .shift_occupancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "2024-06-01T20:30:00Z".parse().unwrap(),
                None,
                None,
            )
            .await
            .unwrap();

        assert!(result.found);
        assert_eq!(result.current_covers, 5);
    }

    #[tokio::test]
    async fn shift_occupancy_reports_unmatched_turn_with_capacity() {
        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Ok(weekend_config()));

        let result = service_with(mock)
            .shift_occupancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "2024-06-01T03:00:00Z".parse().unwrap(),
                Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
                Some(NaiveTime::from_hms_opt(5, 0, 0).unwrap()),
            )
            .await
            .unwrap();

        assert!(!result.found);
        assert_eq!(result.turn, None);
        assert_eq!(result.total_capacity, 90);
        assert_eq!(result.remaining, 90);
        assert_eq!(result.utilization_percent, 0);
    }

    #[tokio::test]
    async fn shift_occupancy_reports_missing_restaurant_with_default_capacity() {
        let mut mock = MockAnalyticsData::new();
        mock.expect_fetch_restaurant_config()
            .returning(|_, _| Err(AppError::NotFound("Restaurant missing".to_string())));

        let result = service_with(mock)
            .shift_occupancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "2024-06-01T20:00:00Z".parse().unwrap(),
                None,
                None,
            )
            .await
            .unwrap();

        assert!(!result.found);
        assert_eq!(result.total_capacity, 100);
    }
}
