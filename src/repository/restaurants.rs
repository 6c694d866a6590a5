//! Restaurants repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Restaurant, RestaurantConfig, UpdateRestaurantSettings},
};

#[derive(Clone)]
pub struct RestaurantsRepository {
    pool: Pool<Postgres>,
}

impl RestaurantsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get restaurant by ID, scoped to a tenant
    pub async fn get_by_id(&self, id: Uuid, tenant_id: Uuid) -> AppResult<Restaurant> {
        sqlx::query_as::<_, Restaurant>(
            "SELECT * FROM restaurants WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }

    /// Fetch the settings subset that reporting needs
    pub async fn get_config(&self, id: Uuid, tenant_id: Uuid) -> AppResult<RestaurantConfig> {
        sqlx::query_as::<_, RestaurantConfig>(
            "SELECT timezone, total_capacity, opening_hours \
             FROM restaurants WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }

    /// Update restaurant settings (only provided fields)
    pub async fn update_settings(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        data: &UpdateRestaurantSettings,
    ) -> AppResult<Restaurant> {
        let opening_hours = match &data.opening_hours {
            Some(hours) => Some(
                serde_json::to_value(hours)
                    .map_err(|e| AppError::Internal(format!("serialize opening hours: {}", e)))?,
            ),
            None => None,
        };

        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.timezone, "timezone");
        add_field!(data.total_capacity, "total_capacity");
        add_field!(opening_hours, "opening_hours");

        let query = format!(
            "UPDATE restaurants SET {} WHERE id = ${} AND tenant_id = ${} RETURNING *",
            sets.join(", "),
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Restaurant>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.timezone);
        bind_field!(data.total_capacity);
        bind_field!(opening_hours);

        builder
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }
}
