//! SeaORM implementation of RestaurantRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::db_err;
use crate::domain::restaurant::{Restaurant, RestaurantRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::restaurant;

pub struct SeaOrmRestaurantRepository {
    db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: restaurant::Model) -> Restaurant {
    Restaurant {
        id: m.id,
        name: m.name,
        address: m.address,
        lat: m.lat,
        lng: m.lng,
        phone: m.phone,
    }
}

#[async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>> {
        let model = restaurant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Restaurant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = restaurant::Entity::find()
            .filter(restaurant::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self) -> DomainResult<Vec<Restaurant>> {
        let models = restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Name)
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> DomainResult<()> {
        if restaurants.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} restaurants", restaurants.len());

        let models = restaurants.into_iter().map(|r| restaurant::ActiveModel {
            id: Set(r.id),
            name: Set(r.name),
            address: Set(r.address),
            lat: Set(r.lat),
            lng: Set(r.lng),
            phone: Set(r.phone),
        });
        restaurant::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        restaurant::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        let max = restaurant::Entity::find()
            .select_only()
            .column_as(restaurant::Column::Id.max(), "max_id")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(max.flatten())
    }
}
