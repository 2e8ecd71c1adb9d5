use async_trait::async_trait;

use super::Restaurant;
use crate::domain::DomainResult;

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>>;

    /// Fetch several restaurants in one round trip. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Restaurant>>;

    /// All restaurants ordered by name
    async fn list(&self) -> DomainResult<Vec<Restaurant>>;

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;

    async fn max_id(&self) -> DomainResult<Option<i32>>;
}
