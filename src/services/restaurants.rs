//! Restaurant settings service

use std::str::FromStr;

use chrono_tz::Tz;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Restaurant, UpdateRestaurantSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct RestaurantsService {
    repository: Repository,
}

impl RestaurantsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a restaurant
    pub async fn get(&self, id: Uuid, tenant_id: Uuid) -> AppResult<Restaurant> {
        self.repository.restaurants.get_by_id(id, tenant_id).await
    }

    /// Update restaurant settings.
    ///
    /// The timezone must be a valid IANA identifier; reporting falls back
    /// to a default zone on bad stored values, but we refuse to store them.
    pub async fn update_settings(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        data: UpdateRestaurantSettings,
    ) -> AppResult<Restaurant> {
        data.validate()?;
        if let Some(tz) = &data.timezone {
            Tz::from_str(tz).map_err(|_| {
                AppError::Validation(format!("Unknown timezone identifier: {}", tz))
            })?;
        }
        self.repository
            .restaurants
            .update_settings(id, tenant_id, &data)
            .await
    }
}
