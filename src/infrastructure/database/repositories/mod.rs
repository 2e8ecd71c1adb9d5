//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod community_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod restaurant_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::PersistenceFailed(format!("Database error: {}", e))
}
