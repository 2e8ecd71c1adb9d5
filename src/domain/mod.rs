//! Domain layer: entities, value types and repository interfaces.

pub mod clock;
pub mod community;
pub mod entity_class;
pub mod repositories;
pub mod reservation;
pub mod restaurant;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use community::{Comment, Favorite, Post};
pub use entity_class::EntityClass;
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use restaurant::Restaurant;
pub use session::Session;
pub use user::User;

pub use crate::shared::errors::DomainError;
