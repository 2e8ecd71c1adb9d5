//! Reservation booking and availability.

pub mod identity;
pub mod service;
pub mod single_flight;
pub mod slots;
pub mod validation;

pub use identity::IdentitySequencer;
pub use service::{ReservationService, ReservationSummary, RestaurantItem};
pub use single_flight::{FlightGuard, SingleFlight};
pub use slots::SlotGenerator;
pub use validation::{
    BookingRequest, ReservationValidator, ValidationResult, MAX_PARTY_SIZE, MIN_PARTY_SIZE,
};
