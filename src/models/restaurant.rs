//! Restaurant model, settings and opening-hours types

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Full restaurant model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    /// IANA timezone name ("Europe/Madrid")
    pub timezone: String,
    /// Total seating capacity of the dining room
    pub total_capacity: i32,
    /// Weekly opening hours as stored (JSONB, may be absent or malformed)
    #[schema(value_type = Option<Object>)]
    pub opening_hours: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of restaurant settings the analytics pipeline needs
#[derive(Debug, Clone, FromRow)]
pub struct RestaurantConfig {
    pub timezone: String,
    pub total_capacity: i32,
    pub opening_hours: Option<serde_json::Value>,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Madrid".to_string(),
            total_capacity: 100,
            opening_hours: None,
        }
    }
}

/// Weekly opening hours: weekday name to day schedule, preserved in the
/// order the dashboard sent them
pub type OpeningHours = IndexMap<String, DaySchedule>;

/// One weekday's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    /// Whether the restaurant opens at all on this day
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Service shifts for the day, in service order
    #[serde(default)]
    pub shifts: Vec<ShiftConfig>,
}

fn default_enabled() -> bool {
    true
}

/// One configured service shift ("Comida", "Cena", ...).
///
/// Every field is optional at the boundary; entries missing a name, start
/// or end are skipped when turns are derived, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShiftConfig {
    pub name: Option<String>,
    /// Local wall-clock start, "HH:MM"
    pub start: Option<String>,
    /// Local wall-clock end, "HH:MM", same day as start
    pub end: Option<String>,
    /// Covers limit for this shift (defaults to 50 when absent)
    #[serde(default, alias = "maxCovers")]
    pub max_covers: Option<i32>,
}

/// Update restaurant settings request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRestaurantSettings {
    /// IANA timezone name
    pub timezone: Option<String>,
    #[validate(range(min = 1, max = 10000, message = "Total capacity must be between 1 and 10000"))]
    pub total_capacity: Option<i32>,
    pub opening_hours: Option<OpeningHours>,
}

/// Parse a stored opening-hours document into the structured type.
///
/// Returns `None` when the value is not a well-formed weekday mapping;
/// callers fall back to the default turn schedule in that case.
pub fn parse_opening_hours(value: &serde_json::Value) -> Option<OpeningHours> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
