//! Repository layer for database operations

pub mod reservations;
pub mod restaurants;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub reservations: reservations::ReservationsRepository,
    pub restaurants: restaurants::RestaurantsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            restaurants: restaurants::RestaurantsRepository::new(pool.clone()),
            pool,
        }
    }
}
