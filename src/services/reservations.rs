//! Reservation lifecycle service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        CreateReservation, Reservation, ReservationQuery, ReservationStatus, UpdateReservation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a single reservation
    pub async fn get(&self, id: Uuid, tenant_id: Uuid) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id, tenant_id).await
    }

    /// List reservations for a restaurant
    pub async fn list(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        filter: &ReservationQuery,
    ) -> AppResult<Vec<Reservation>> {
        // Verify the restaurant belongs to the tenant
        self.repository
            .restaurants
            .get_by_id(restaurant_id, tenant_id)
            .await?;
        self.repository
            .reservations
            .list(restaurant_id, tenant_id, filter)
            .await
    }

    /// Create a reservation for a restaurant
    pub async fn create(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        data: CreateReservation,
    ) -> AppResult<Reservation> {
        data.validate()?;
        self.repository
            .restaurants
            .get_by_id(restaurant_id, tenant_id)
            .await?;
        self.repository
            .reservations
            .create(restaurant_id, tenant_id, &data)
            .await
    }

    /// Update a reservation's fields
    pub async fn update(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        data: UpdateReservation,
    ) -> AppResult<Reservation> {
        data.validate()?;
        let current = self.repository.reservations.get_by_id(id, tenant_id).await?;
        if current.status == ReservationStatus::Cancelled {
            return Err(AppError::BusinessRule(
                "Cannot update a cancelled reservation".to_string(),
            ));
        }
        self.repository
            .reservations
            .update(id, tenant_id, &data)
            .await
    }

    /// Cancel a reservation
    pub async fn cancel(&self, id: Uuid, tenant_id: Uuid) -> AppResult<Reservation> {
        let current = self.repository.reservations.get_by_id(id, tenant_id).await?;
        if current.status == ReservationStatus::Cancelled {
            return Err(AppError::BusinessRule(
                "Reservation is already cancelled".to_string(),
            ));
        }
        self.repository
            .reservations
            .set_status(id, tenant_id, ReservationStatus::Cancelled)
            .await
    }
}
