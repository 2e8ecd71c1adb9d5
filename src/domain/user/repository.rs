use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    async fn insert_many(&self, users: Vec<User>) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
    async fn max_id(&self) -> DomainResult<Option<i32>>;
}
