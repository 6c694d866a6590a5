//! Data models for Mesa

pub mod reservation;
pub mod restaurant;
pub mod staff;

// Re-export commonly used types
pub use reservation::{
    CreateReservation, Reservation, ReservationQuery, ReservationStatus, UpdateReservation,
};
pub use restaurant::{
    parse_opening_hours, DaySchedule, OpeningHours, Restaurant, RestaurantConfig, ShiftConfig,
    UpdateRestaurantSettings,
};
pub use staff::{StaffClaims, StaffRole};
