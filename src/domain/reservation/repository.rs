//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation. When `id` is `None` the store assigns one
    /// that is greater than every id it has ever held.
    async fn insert(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// Persist a seed baseline in one call
    async fn insert_many(&self, reservations: Vec<NewReservation>) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// All reservations owned by a user, earliest first
    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Reservations owned by a user with the given status, earliest first
    async fn list_by_user_and_status(
        &self,
        user_id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Vec<Reservation>>;

    /// Delete by ID. Returns `false` if nothing was deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;

    async fn count(&self) -> DomainResult<u64>;

    /// Highest stored id, if any
    async fn max_id(&self) -> DomainResult<Option<i32>>;

    /// Highest id the store has ever held, deleted rows included.
    /// Survives restarts for persistent stores.
    async fn high_water(&self) -> DomainResult<Option<i32>>;
}
