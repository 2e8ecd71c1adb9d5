use async_trait::async_trait;

use super::{Comment, Favorite, Post};
use crate::domain::DomainResult;

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn insert_posts(&self, posts: Vec<Post>) -> DomainResult<()>;
    /// All posts, oldest id first
    async fn list_posts(&self) -> DomainResult<Vec<Post>>;
    async fn count_posts(&self) -> DomainResult<u64>;
    async fn max_post_id(&self) -> DomainResult<Option<i32>>;

    async fn insert_comments(&self, comments: Vec<Comment>) -> DomainResult<()>;
    async fn count_comments(&self) -> DomainResult<u64>;
    async fn max_comment_id(&self) -> DomainResult<Option<i32>>;

    async fn insert_favorites(&self, favorites: Vec<Favorite>) -> DomainResult<()>;
    async fn count_favorites(&self) -> DomainResult<u64>;
}
