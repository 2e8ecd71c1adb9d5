//! # DineConnect booking
//!
//! Reservation booking and availability for the DineConnect app.
//!
//! ## Architecture
//!
//! - **domain**: Entities, value types, repository traits, the clock
//! - **application**: Booking service, slot generation, validation, seeding
//! - **infrastructure**: SeaORM persistence, in-memory store, password hashing
//! - **config**: TOML configuration
//! - **shared**: Error types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use application::{ReservationService, SeedCoordinator};
pub use shared::errors::{AppError, DomainError};
