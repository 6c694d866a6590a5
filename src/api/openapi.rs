//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, health, reservations, restaurants};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mesa API",
        version = "1.0.0",
        description = "Restaurant Reservation Management REST API",
        contact(name = "Mesa Team", email = "contact@mesa-reservas.es")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Restaurants
        restaurants::get_restaurant,
        restaurants::update_settings,
        // Reservations
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
        // Analytics
        analytics::get_analytics,
        analytics::get_shift_occupancy,
    ),
    components(
        schemas(
            // Restaurants
            crate::models::Restaurant,
            crate::models::UpdateRestaurantSettings,
            crate::models::DaySchedule,
            crate::models::ShiftConfig,
            // Reservations
            crate::models::Reservation,
            crate::models::ReservationStatus,
            crate::models::ReservationQuery,
            crate::models::CreateReservation,
            crate::models::UpdateReservation,
            // Analytics
            analytics::AnalyticsReport,
            analytics::TrendSet,
            analytics::DayRow,
            analytics::HourRow,
            analytics::TurnRow,
            analytics::SourceRow,
            analytics::RealTimeRow,
            analytics::StatusCounts,
            analytics::ShiftOccupancy,
            analytics::AnalyticsQuery,
            analytics::OccupancyQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "restaurants", description = "Restaurant settings"),
        (name = "reservations", description = "Reservation management"),
        (name = "analytics", description = "Reservation analytics and occupancy")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
