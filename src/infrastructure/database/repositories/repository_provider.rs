//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use log::info;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::domain::community::CommunityRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainResult;
use crate::infrastructure::database::migrator::Migrator;

use super::community_repository::SeaOrmCommunityRepository;
use super::db_err;
use super::reservation_repository::SeaOrmReservationRepository;
use super::restaurant_repository::SeaOrmRestaurantRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// repos.ensure_schema().await?;
/// let mine = repos.reservations().list_by_user(10000001).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    reservations: SeaOrmReservationRepository,
    restaurants: SeaOrmRestaurantRepository,
    users: SeaOrmUserRepository,
    community: SeaOrmCommunityRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            reservations: SeaOrmReservationRepository::new(db.clone()),
            restaurants: SeaOrmRestaurantRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            community: SeaOrmCommunityRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn restaurants(&self) -> &dyn RestaurantRepository {
        &self.restaurants
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn community(&self) -> &dyn CommunityRepository {
        &self.community
    }

    async fn ensure_schema(&self) -> DomainResult<()> {
        Migrator::up(&self.db, None).await.map_err(db_err)?;
        info!("Database schema is up to date");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityClass, NewReservation, ReservationStatus, Restaurant};
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use chrono::{Duration, TimeZone, Utc};

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = init_database(&DatabaseConfig::memory()).await.unwrap();
        let repos = SeaOrmRepositoryProvider::new(db);
        repos.ensure_schema().await.unwrap();
        repos
    }

    fn restaurant(id: i32, name: &str) -> Restaurant {
        Restaurant {
            id,
            name: name.to_string(),
            address: "1 Test St".to_string(),
            lat: 1.0,
            lng: 2.0,
            phone: None,
        }
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let repos = provider().await;
        repos.ensure_schema().await.unwrap();
        assert_eq!(repos.reservations().count().await.unwrap(), 0);
        assert_eq!(repos.max_id(EntityClass::Reservation).await.unwrap(), None);
    }

    #[tokio::test]
    async fn native_ids_follow_the_highest_ever_assigned() {
        let repos = provider().await;
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap();

        repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2).with_id(50_000_002))
            .await
            .unwrap();

        let next = repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2))
            .await
            .unwrap();
        assert_eq!(next.id, 50_000_003);

        assert!(repos.reservations().delete(next.id).await.unwrap());
        assert!(!repos.reservations().delete(next.id).await.unwrap());

        let after_delete = repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2))
            .await
            .unwrap();
        assert_eq!(after_delete.id, 50_000_004);
    }

    #[tokio::test]
    async fn high_water_remembers_deleted_rows() {
        let repos = provider().await;
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap();
        assert_eq!(repos.high_water(EntityClass::Reservation).await.unwrap(), None);

        repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2).with_id(50_000_007))
            .await
            .unwrap();
        assert!(repos.reservations().delete(50_000_007).await.unwrap());

        assert_eq!(repos.max_id(EntityClass::Reservation).await.unwrap(), None);
        assert_eq!(
            repos.high_water(EntityClass::Reservation).await.unwrap(),
            Some(50_000_007)
        );
    }

    #[tokio::test]
    async fn lists_are_per_user_and_ordered_by_time() {
        let repos = provider().await;
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();

        repos
            .reservations()
            .insert_many(vec![
                NewReservation::confirmed(7, 1, base + Duration::days(2), 2).with_id(3),
                NewReservation::confirmed(7, 1, base, 4)
                    .with_id(4)
                    .with_status(ReservationStatus::Pending),
                NewReservation::confirmed(8, 1, base, 6).with_id(5),
            ])
            .await
            .unwrap();

        let mine = repos.reservations().list_by_user(7).await.unwrap();
        assert_eq!(mine.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 3]);
        assert_eq!(mine[0].at, base);
        assert_eq!(mine[0].status, ReservationStatus::Pending);

        let pending = repos
            .reservations()
            .list_by_user_and_status(7, ReservationStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].party_size, 4);

        assert_eq!(repos.max_id(EntityClass::Reservation).await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn restaurants_lookup_and_ordering() {
        let repos = provider().await;
        repos
            .restaurants()
            .insert_many(vec![
                restaurant(20_000_001, "Ocean View Grill"),
                restaurant(20_000_002, "Mountain Top Diner"),
            ])
            .await
            .unwrap();

        let names: Vec<_> = repos
            .restaurants()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Mountain Top Diner", "Ocean View Grill"]);

        let found = repos
            .restaurants()
            .find_by_ids(&[20_000_002, 99])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 20_000_002);
        assert!(repos.restaurants().find_by_ids(&[]).await.unwrap().is_empty());

        assert_eq!(
            repos.max_id(EntityClass::Restaurant).await.unwrap(),
            Some(20_000_002)
        );
    }
}
