//! In-memory storage implementation

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::community::CommunityRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::user::UserRepository;
use crate::domain::{
    Comment, DomainError, DomainResult, Favorite, NewReservation, Post, Reservation,
    ReservationStatus, Restaurant, User,
};

fn duplicate(entity: &str, key: impl Debug) -> DomainError {
    DomainError::PersistenceFailed(format!("{} {:?} already exists", entity, key))
}

fn insert_unique<K, T>(map: &DashMap<K, T>, entity: &str, key: K, value: T) -> DomainResult<()>
where
    K: Hash + Eq + Copy + Debug,
{
    match map.entry(key) {
        Entry::Occupied(_) => Err(duplicate(entity, key)),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Fails if any key is already stored or repeats within the batch.
/// Run before writing so a rejected batch leaves the map untouched.
fn check_batch<K, T>(
    map: &DashMap<K, T>,
    entity: &str,
    keys: impl IntoIterator<Item = K>,
) -> DomainResult<()>
where
    K: Hash + Eq + Copy + Debug,
{
    let mut seen = HashSet::new();
    for key in keys {
        if map.contains_key(&key) || !seen.insert(key) {
            return Err(duplicate(entity, key));
        }
    }
    Ok(())
}

/// All-or-nothing batch insert.
fn insert_batch<K, T>(
    map: &DashMap<K, T>,
    entity: &str,
    items: Vec<T>,
    key_of: impl Fn(&T) -> K,
) -> DomainResult<()>
where
    K: Hash + Eq + Copy + Debug,
{
    check_batch(map, entity, items.iter().map(&key_of))?;
    for item in items {
        insert_unique(map, entity, key_of(&item), item)?;
    }
    Ok(())
}

fn max_key<T>(map: &DashMap<i32, T>) -> Option<i32> {
    map.iter().map(|e| *e.key()).max()
}

// ── Reservations ───────────────────────────────────────────────

pub struct InMemoryReservations {
    records: DashMap<i32, Reservation>,
    /// Highest id ever held, so deleted ids are never handed out again
    high_water: AtomicI32,
}

impl InMemoryReservations {
    fn new() -> Self {
        Self {
            records: DashMap::new(),
            high_water: AtomicI32::new(0),
        }
    }

    fn sorted_by_time(&self, filter: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self
            .records
            .iter()
            .filter(|e| filter(e.value()))
            .map(|e| e.value().clone())
            .collect();
        out.sort_by_key(|r| (r.at, r.id));
        out
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservations {
    async fn insert(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let id = match reservation.id {
            Some(id) => id,
            None => self.high_water.fetch_add(1, Ordering::SeqCst) + 1,
        };
        let record = reservation.into_reservation(id);
        insert_unique(&self.records, "Reservation", id, record.clone())?;
        self.high_water.fetch_max(id, Ordering::SeqCst);
        Ok(record)
    }

    async fn insert_many(&self, reservations: Vec<NewReservation>) -> DomainResult<()> {
        check_batch(
            &self.records,
            "Reservation",
            reservations.iter().filter_map(|r| r.id),
        )?;
        for r in reservations {
            self.insert(r).await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn list_by_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self.sorted_by_time(|r| r.user_id == user_id))
    }

    async fn list_by_user_and_status(
        &self,
        user_id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.sorted_by_time(|r| r.user_id == user_id && r.status == status))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.records.remove(&id).is_some())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        Ok(max_key(&self.records))
    }

    async fn high_water(&self) -> DomainResult<Option<i32>> {
        let high = self.high_water.load(Ordering::SeqCst);
        Ok((high > 0).then_some(high))
    }
}

// ── Restaurants ────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRestaurants {
    records: DashMap<i32, Restaurant>,
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurants {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Restaurant>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| r.clone()))
            .collect())
    }

    async fn list(&self) -> DomainResult<Vec<Restaurant>> {
        let mut all: Vec<Restaurant> = self.records.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> DomainResult<()> {
        insert_batch(&self.records, "Restaurant", restaurants, |r| r.id)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        Ok(max_key(&self.records))
    }
}

// ── Users ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUsers {
    records: DashMap<i32, User>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.records.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .records
            .iter()
            .find(|e| e.value().username == username)
            .map(|e| e.value().clone()))
    }

    async fn insert_many(&self, users: Vec<User>) -> DomainResult<()> {
        insert_batch(&self.records, "User", users, |u| u.id)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }

    async fn max_id(&self) -> DomainResult<Option<i32>> {
        Ok(max_key(&self.records))
    }
}

// ── Community ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCommunity {
    posts: DashMap<i32, Post>,
    comments: DashMap<i32, Comment>,
    favorites: DashMap<(i32, i32), Favorite>,
}

#[async_trait]
impl CommunityRepository for InMemoryCommunity {
    async fn insert_posts(&self, posts: Vec<Post>) -> DomainResult<()> {
        insert_batch(&self.posts, "Post", posts, |p| p.id)
    }

    async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        let mut all: Vec<Post> = self.posts.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn count_posts(&self) -> DomainResult<u64> {
        Ok(self.posts.len() as u64)
    }

    async fn max_post_id(&self) -> DomainResult<Option<i32>> {
        Ok(max_key(&self.posts))
    }

    async fn insert_comments(&self, comments: Vec<Comment>) -> DomainResult<()> {
        insert_batch(&self.comments, "Comment", comments, |c| c.id)
    }

    async fn count_comments(&self) -> DomainResult<u64> {
        Ok(self.comments.len() as u64)
    }

    async fn max_comment_id(&self) -> DomainResult<Option<i32>> {
        Ok(max_key(&self.comments))
    }

    async fn insert_favorites(&self, favorites: Vec<Favorite>) -> DomainResult<()> {
        insert_batch(&self.favorites, "Favorite", favorites, |f| {
            (f.user_id, f.restaurant_id)
        })
    }

    async fn count_favorites(&self) -> DomainResult<u64> {
        Ok(self.favorites.len() as u64)
    }
}

// ── Provider ───────────────────────────────────────────────────

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    reservations: InMemoryReservations,
    restaurants: InMemoryRestaurants,
    users: InMemoryUsers,
    community: InMemoryCommunity,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            reservations: InMemoryReservations::new(),
            restaurants: InMemoryRestaurants::default(),
            users: InMemoryUsers::default(),
            community: InMemoryCommunity::default(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityClass;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn native_ids_are_never_reused() {
        let repos = InMemoryRepositoryProvider::new();
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap();

        let first = repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2))
            .await
            .unwrap();
        assert_eq!(first.id, 1);

        repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2).with_id(50_000_002))
            .await
            .unwrap();
        assert!(repos.reservations().delete(50_000_002).await.unwrap());

        let next = repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, at, 2))
            .await
            .unwrap();
        assert_eq!(next.id, 50_000_003);
        assert_eq!(
            repos.max_id(EntityClass::Reservation).await.unwrap(),
            Some(50_000_003)
        );
    }

    #[tokio::test]
    async fn high_water_remembers_deleted_rows() {
        let repos = InMemoryRepositoryProvider::new();
        assert_eq!(repos.high_water(EntityClass::Reservation).await.unwrap(), None);

        repos
            .reservations()
            .insert(NewReservation::confirmed(1, 2, Utc::now(), 2).with_id(50_000_007))
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
    async fn duplicate_explicit_id_is_rejected() {
        let repos = InMemoryRepositoryProvider::new();
        let at = Utc::now() + Duration::days(1);
        let r = NewReservation::confirmed(1, 2, at, 2).with_id(9);

        repos.reservations().insert(r.clone()).await.unwrap();
        assert!(matches!(
            repos.reservations().insert(r).await,
            Err(DomainError::PersistenceFailed(_))
        ));
    }

    #[tokio::test]
    async fn batch_with_a_repeated_id_writes_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap();

        let result = repos
            .reservations()
            .insert_many(vec![
                NewReservation::confirmed(7, 1, at, 2).with_id(50_000_001),
                NewReservation::confirmed(7, 1, at, 2).with_id(50_000_002),
                NewReservation::confirmed(7, 1, at, 2).with_id(50_000_001),
            ])
            .await;

        assert!(matches!(result, Err(DomainError::PersistenceFailed(_))));
        assert_eq!(repos.reservations().count().await.unwrap(), 0);
        assert_eq!(repos.high_water(EntityClass::Reservation).await.unwrap(), None);
    }

    #[tokio::test]
    async fn batch_clashing_with_a_stored_row_writes_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let restaurant = |id: i32, name: &str| Restaurant {
            id,
            name: name.to_string(),
            address: "1 Main St".to_string(),
            lat: 0.0,
            lng: 0.0,
            phone: None,
        };
        repos
            .restaurants()
            .insert_many(vec![restaurant(20_000_002, "Harbour")])
            .await
            .unwrap();

        let result = repos
            .restaurants()
            .insert_many(vec![
                restaurant(20_000_001, "Bistro"),
                restaurant(20_000_002, "Harbour again"),
                restaurant(20_000_003, "Noodle Bar"),
            ])
            .await;

        assert!(matches!(result, Err(DomainError::PersistenceFailed(_))));
        assert_eq!(repos.restaurants().count().await.unwrap(), 1);
        assert_eq!(
            repos.restaurants().find_by_id(20_000_002).await.unwrap().unwrap().name,
            "Harbour"
        );
    }

    #[tokio::test]
    async fn repeated_favorite_is_rejected_like_a_primary_key() {
        let repos = InMemoryRepositoryProvider::new();
        let fav = |rating| Favorite {
            user_id: 10_000_001,
            restaurant_id: 20_000_001,
            rating,
        };

        let result = repos.community().insert_favorites(vec![fav(4), fav(5)]).await;

        assert!(matches!(result, Err(DomainError::PersistenceFailed(_))));
        assert_eq!(repos.community().count_favorites().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn user_listing_is_ordered_by_time() {
        let repos = InMemoryRepositoryProvider::new();
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        repos
            .reservations()
            .insert_many(vec![
                NewReservation::confirmed(7, 1, base + Duration::hours(5), 2).with_id(1),
                NewReservation::confirmed(7, 1, base, 2).with_id(2),
                NewReservation::confirmed(8, 1, base, 2).with_id(3),
            ])
            .await
            .unwrap();

        let ids: Vec<_> = repos
            .reservations()
            .list_by_user(7)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
