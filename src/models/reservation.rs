//! Reservation model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Reconfirmed,
    Arrived,
    Seated,
    Finished,
    NoShow,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Reconfirmed => "reconfirmed",
            ReservationStatus::Arrived => "arrived",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Finished => "finished",
            ReservationStatus::NoShow => "no_show",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses that hold seats against capacity (shift-occupancy lookups)
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed
                | ReservationStatus::Reconfirmed
                | ReservationStatus::Arrived
                | ReservationStatus::Seated
                | ReservationStatus::Pending
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "reconfirmed" => Ok(ReservationStatus::Reconfirmed),
            "arrived" => Ok(ReservationStatus::Arrived),
            "seated" => Ok(ReservationStatus::Seated),
            "finished" => Ok(ReservationStatus::Finished),
            "no_show" => Ok(ReservationStatus::NoShow),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

// SQLx conversion for ReservationStatus
impl sqlx::Type<Postgres> for ReservationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ReservationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ReservationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub restaurant_id: Uuid,
    /// Booked seating date and time (UTC)
    pub starts_at: DateTime<Utc>,
    /// Number of guests in the party
    pub party_size: i32,
    pub status: ReservationStatus,
    /// Booking channel (phone, web, whatsapp, walk-in, ...)
    pub source: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    /// Booked seating date and time (UTC)
    pub starts_at: DateTime<Utc>,
    #[validate(range(min = 1, max = 100, message = "Party size must be between 1 and 100"))]
    pub party_size: i32,
    /// Initial status (defaults to pending)
    pub status: Option<ReservationStatus>,
    pub source: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub customer_email: Option<String>,
    pub notes: Option<String>,
}

/// Update reservation request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    pub starts_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 100, message = "Party size must be between 1 and 100"))]
    pub party_size: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub source: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Customer name cannot be empty"))]
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub customer_email: Option<String>,
    pub notes: Option<String>,
}

/// Reservation list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    /// Lower bound on the seating time (UTC, RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Upper bound on the seating time (UTC, RFC 3339)
    pub to: Option<DateTime<Utc>>,
    /// Filter to a single status
    pub status: Option<ReservationStatus>,
    /// Include cancelled reservations (excluded by default)
    pub include_cancelled: Option<bool>,
}
