//! SeaORM implementation of CommunityRepository (posts, comments, favorites)

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::community::{Comment, CommunityRepository, Favorite, Post};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{comment, favorite, post};

pub struct SeaOrmCommunityRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommunityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommunityRepository for SeaOrmCommunityRepository {
    async fn insert_posts(&self, posts: Vec<Post>) -> DomainResult<()> {
        if posts.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} posts", posts.len());

        let models = posts.into_iter().map(|p| post::ActiveModel {
            id: Set(p.id),
            user_id: Set(p.user_id),
            title: Set(p.title),
            content: Set(p.content),
        });
        post::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        let models = post::Entity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| Post {
                id: m.id,
                user_id: m.user_id,
                title: m.title,
                content: m.content,
            })
            .collect())
    }

    async fn count_posts(&self) -> DomainResult<u64> {
        post::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn max_post_id(&self) -> DomainResult<Option<i32>> {
        let max = post::Entity::find()
            .select_only()
            .column_as(post::Column::Id.max(), "max_id")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(max.flatten())
    }

    async fn insert_comments(&self, comments: Vec<Comment>) -> DomainResult<()> {
        if comments.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} comments", comments.len());

        let models = comments.into_iter().map(|c| comment::ActiveModel {
            id: Set(c.id),
            user_id: Set(c.user_id),
            post_id: Set(c.post_id),
            content: Set(c.content),
        });
        comment::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_comments(&self) -> DomainResult<u64> {
        comment::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn max_comment_id(&self) -> DomainResult<Option<i32>> {
        let max = comment::Entity::find()
            .select_only()
            .column_as(comment::Column::Id.max(), "max_id")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(max.flatten())
    }

    async fn insert_favorites(&self, favorites: Vec<Favorite>) -> DomainResult<()> {
        if favorites.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} favorites", favorites.len());

        let models = favorites.into_iter().map(|f| favorite::ActiveModel {
            user_id: Set(f.user_id),
            restaurant_id: Set(f.restaurant_id),
            rating: Set(f.rating),
        });
        favorite::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_favorites(&self) -> DomainResult<u64> {
        favorite::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
