//! Reservation management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreateReservation, Reservation, ReservationQuery, UpdateReservation},
};

use super::AuthenticatedStaff;

/// List reservations for a restaurant
#[utoipa::path(
    get,
    path = "/restaurants/{id}/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID"),
        ReservationQuery
    ),
    responses(
        (status = 200, description = "Reservations ordered by seating time", body = [Reservation]),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state
        .services
        .reservations
        .list(id, claims.tenant_id, &query)
        .await?;
    Ok(Json(reservations))
}

/// Create a new reservation
#[utoipa::path(
    post,
    path = "/restaurants/{id}/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Json(reservation): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let created = state
        .services
        .reservations
        .create(id, claims.tenant_id, reservation)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get reservation details by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get(id, claims.tenant_id).await?;
    Ok(Json(reservation))
}

/// Update an existing reservation
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation is cancelled")
    )
)]
pub async fn update_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Json(reservation): Json<UpdateReservation>,
) -> AppResult<Json<Reservation>> {
    let updated = state
        .services
        .reservations
        .update(id, claims.tenant_id, reservation)
        .await?;
    Ok(Json(updated))
}

/// Cancel a reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation is already cancelled")
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let cancelled = state
        .services
        .reservations
        .cancel(id, claims.tenant_id)
        .await?;
    Ok(Json(cancelled))
}
