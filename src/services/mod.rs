//! Business logic services

pub mod analytics;
pub mod reservations;
pub mod restaurants;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub reservations: reservations::ReservationsService,
    pub restaurants: restaurants::RestaurantsService,
    pub analytics: analytics::AnalyticsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            reservations: reservations::ReservationsService::new(repository.clone()),
            restaurants: restaurants::RestaurantsService::new(repository.clone()),
            analytics: analytics::AnalyticsService::new(repository),
        }
    }
}
