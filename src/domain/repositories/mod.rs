//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::community::CommunityRepository;
use super::entity_class::EntityClass;
use super::reservation::ReservationRepository;
use super::restaurant::RestaurantRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let r = repos.restaurants().find_by_id(20000001).await?;
///     let mine = repos.reservations().list_by_user(10000001).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn users(&self) -> &dyn UserRepository;
    fn community(&self) -> &dyn CommunityRepository;

    /// Create tables (or whatever backing structure) if missing.
    async fn ensure_schema(&self) -> DomainResult<()>;

    /// Highest stored id for an entity class.
    async fn max_id(&self, class: EntityClass) -> DomainResult<Option<i32>> {
        match class {
            EntityClass::User => self.users().max_id().await,
            EntityClass::Restaurant => self.restaurants().max_id().await,
            EntityClass::Post => self.community().max_post_id().await,
            EntityClass::Comment => self.community().max_comment_id().await,
            EntityClass::Reservation => self.reservations().max_id().await,
        }
    }

    /// Highest id ever held for an entity class. Only reservations are
    /// deleted, so the other classes fall back to `max_id`.
    async fn high_water(&self, class: EntityClass) -> DomainResult<Option<i32>> {
        match class {
            EntityClass::Reservation => self.reservations().high_water().await,
            other => self.max_id(other).await,
        }
    }
}
