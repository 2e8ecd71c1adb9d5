//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
};

use super::db_err;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn insert_many(&self, users: Vec<User>) -> DomainResult<()> {
        if users.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} users", users.len());

        let models = users.into_iter().map(|u| user::ActiveModel {
            id: Set(u.id),
            username: Set(u.username),
            password_hash: Set(u.password_hash),
        });
        user::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        let max = user::Entity::find()
            .select_only()
            .column_as(user::Column::Id.max(), "max_id")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(max.flatten())
    }
}
