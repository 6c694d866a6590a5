//! Reservations repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateReservation, Reservation, ReservationQuery, ReservationStatus, UpdateReservation},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID, scoped to a tenant
    pub async fn get_by_id(&self, id: Uuid, tenant_id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// List reservations for a restaurant with seating times inside
    /// `[from, to]`, ordered by seating time ascending
    pub async fn list_in_range(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        exclude_cancelled: bool,
    ) -> AppResult<Vec<Reservation>> {
        let mut query = String::from(
            "SELECT * FROM reservations \
             WHERE restaurant_id = $1 AND tenant_id = $2 \
               AND starts_at >= $3 AND starts_at <= $4",
        );
        if exclude_cancelled {
            query.push_str(" AND status != 'cancelled'");
        }
        query.push_str(" ORDER BY starts_at ASC");

        let rows = sqlx::query_as::<_, Reservation>(&query)
            .bind(restaurant_id)
            .bind(tenant_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List reservations for the dashboard with optional filters.
    ///
    /// Cancelled rows are excluded unless explicitly requested or the
    /// query filters on a single status.
    pub async fn list(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        filter: &ReservationQuery,
    ) -> AppResult<Vec<Reservation>> {
        let mut conditions = vec!["restaurant_id = $1".to_string(), "tenant_id = $2".to_string()];
        let mut idx = 3;

        if filter.from.is_some() {
            conditions.push(format!("starts_at >= ${}", idx));
            idx += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("starts_at <= ${}", idx));
            idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        } else if !filter.include_cancelled.unwrap_or(false) {
            conditions.push("status != 'cancelled'".to_string());
        }
        let _ = idx;

        let query = format!(
            "SELECT * FROM reservations WHERE {} ORDER BY starts_at ASC",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Reservation>(&query)
            .bind(restaurant_id)
            .bind(tenant_id);
        if let Some(from) = filter.from {
            builder = builder.bind(from);
        }
        if let Some(to) = filter.to {
            builder = builder.bind(to);
        }
        if let Some(status) = filter.status {
            builder = builder.bind(status);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Create a new reservation
    pub async fn create(
        &self,
        restaurant_id: Uuid,
        tenant_id: Uuid,
        data: &CreateReservation,
    ) -> AppResult<Reservation> {
        let status = data.status.unwrap_or(ReservationStatus::Pending);
        let row = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (id, tenant_id, restaurant_id, starts_at, party_size, status, source,
                 customer_name, customer_phone, customer_email, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant_id)
        .bind(restaurant_id)
        .bind(data.starts_at)
        .bind(data.party_size)
        .bind(status)
        .bind(&data.source)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.customer_email)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a reservation's fields
    pub async fn update(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        data: &UpdateReservation,
    ) -> AppResult<Reservation> {
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

        add_field!(data.starts_at, "starts_at");
        add_field!(data.party_size, "party_size");
        add_field!(data.status, "status");
        add_field!(data.source, "source");
        add_field!(data.customer_name, "customer_name");
        add_field!(data.customer_phone, "customer_phone");
        add_field!(data.customer_email, "customer_email");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE reservations SET {} WHERE id = ${} AND tenant_id = ${} RETURNING *",
            sets.join(", "),
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Reservation>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.starts_at);
        bind_field!(data.party_size);
        bind_field!(data.status);
        bind_field!(data.source);
        bind_field!(data.customer_name);
        bind_field!(data.customer_phone);
        bind_field!(data.customer_email);
        bind_field!(data.notes);

        builder
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Set a reservation's lifecycle status
    pub async fn set_status(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $1, updated_at = $2 \
             WHERE id = $3 AND tenant_id = $4 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }
}
