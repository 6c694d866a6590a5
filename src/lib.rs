//! Mesa Restaurant Reservation Management System
//!
//! A multi-tenant REST JSON API for restaurant staff dashboards: reservation
//! management, per-restaurant settings (opening hours, capacity, timezone)
//! and derived analytics (period aggregation, occupancy, shift availability).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reporting;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub repository: repository::Repository,
}
