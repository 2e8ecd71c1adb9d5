//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait, Value,
};

use super::db_err;
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        id: m.id,
        restaurant_id: m.restaurant_id,
        user_id: m.user_id,
        at: m.at,
        party_size: m.party_size,
        status: m.status.parse()?,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

fn new_to_active(r: NewReservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: match r.id {
            Some(id) => Set(id),
            None => NotSet,
        },
        restaurant_id: Set(r.restaurant_id),
        user_id: Set(r.user_id),
        at: Set(r.at),
        party_size: Set(r.party_size),
        status: Set(r.status.as_str().to_string()),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Inserting reservation for user {} at restaurant {}",
            r.user_id, r.restaurant_id
        );
        let saved = new_to_active(r).insert(&self.db).await.map_err(db_err)?;
        model_to_domain(saved)
    }

    async fn insert_many(&self, reservations: Vec<NewReservation>) -> DomainResult<()> {
        if reservations.is_empty() {
            return Ok(());
        }
        debug!("Inserting {} reservations", reservations.len());

        let txn = self.db.begin().await.map_err(db_err)?;
        for r in reservations {
            new_to_active(r).insert(&txn).await.map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_asc(reservation::Column::At)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn list_by_user_and_status(
        &self,
        user_id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .filter(reservation::Column::Status.eq(status.as_str()))
            .order_by_asc(reservation::Column::At)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        debug!("Deleting reservation: {}", id);
        let result = reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> DomainResult<u64> {
        reservation::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        let max = reservation::Entity::find()
            .select_only()
            .column_as(reservation::Column::Id.max(), "max_id")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(max.flatten())
    }

    async fn high_water(&self) -> DomainResult<Option<i32>> {
        let max = self.max_id().await?;
        if self.db.get_database_backend() != DbBackend::Sqlite {
            return Ok(max);
        }

        // AUTOINCREMENT keeps the largest id ever used here, deleted rows included.
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT seq FROM sqlite_sequence WHERE name = ?",
                [Value::from("reservations")],
            ))
            .await
            .map_err(db_err)?;
        let seq = match row {
            Some(row) => Some(row.try_get::<i32>("", "seq").map_err(db_err)?),
            None => None,
        };
        Ok(max.max(seq))
    }
}
