pub mod booking;
pub mod seeding;

// Re-export key types for convenience
pub use booking::{
    IdentitySequencer, ReservationService, ReservationSummary, ReservationValidator,
    RestaurantItem, SlotGenerator, ValidationResult,
};
pub use seeding::{SeedCoordinator, SeedReport};
