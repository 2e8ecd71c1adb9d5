//! Baseline data seeding.

pub mod coordinator;
pub mod seeders;

pub use coordinator::{SeedCoordinator, SeedReport};
pub use seeders::{default_seeders, SeedContext, Seeder};
