//! Restaurant endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Restaurant, UpdateRestaurantSettings},
};

use super::AuthenticatedStaff;

/// Get restaurant details by ID
#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "restaurants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant details", body = Restaurant),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn get_restaurant(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state.services.restaurants.get(id, claims.tenant_id).await?;
    Ok(Json(restaurant))
}

/// Update restaurant settings
#[utoipa::path(
    put,
    path = "/restaurants/{id}/settings",
    tag = "restaurants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = UpdateRestaurantSettings,
    responses(
        (status = 200, description = "Settings updated", body = Restaurant),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<Uuid>,
    Json(settings): Json<UpdateRestaurantSettings>,
) -> AppResult<Json<Restaurant>> {
    claims.require_manage_settings()?;

    let updated = state
        .services
        .restaurants
        .update_settings(id, claims.tenant_id, settings)
        .await?;
    Ok(Json(updated))
}
