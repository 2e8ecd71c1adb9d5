//! Reservation booking service
//!
//! Everything the booking UI calls goes through here:
//! - listing a user's reservations (optionally by status) with restaurant names
//! - creating a reservation after validation and restaurant lookup
//! - deleting a reservation owned by the caller
//! - restaurant choices and free slots for the booking form

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::identity::IdentitySequencer;
use super::single_flight::SingleFlight;
use super::slots::SlotGenerator;
use super::validation::{ReservationValidator, ValidationResult};
use crate::config::{BookingConfig, IdAssignment};
use crate::domain::{
    DomainError, DomainResult, EntityClass, NewReservation, RepositoryProvider, Reservation,
    ReservationStatus, Session, SharedClock,
};

/// A reservation with its restaurant name resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationSummary {
    pub id: i32,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub user_id: i32,
    pub at: DateTime<Utc>,
    pub party_size: i32,
    pub status: ReservationStatus,
}

impl ReservationSummary {
    fn from_parts(r: Reservation, restaurant_name: String) -> Self {
        Self {
            id: r.id,
            restaurant_id: r.restaurant_id,
            restaurant_name,
            user_id: r.user_id,
            at: r.at,
            party_size: r.party_size,
            status: r.status,
        }
    }
}

/// Restaurant choice for the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantItem {
    pub id: i32,
    pub name: String,
}

impl std::fmt::Display for RestaurantItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    validator: ReservationValidator,
    slots: SlotGenerator,
    /// Present only when the store does not assign ids itself.
    sequencer: Option<Arc<IdentitySequencer>>,
    /// Held across `next_id` + insert in sequenced mode.
    id_lock: Mutex<()>,
    create_flight: SingleFlight,
    delete_flight: SingleFlight,
}

impl ReservationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        clock: SharedClock,
        booking: &BookingConfig,
    ) -> DomainResult<Self> {
        let sequencer = match booking.id_assignment {
            IdAssignment::Native => None,
            IdAssignment::Sequenced => Some(Arc::new(IdentitySequencer::new(repos.clone()))),
        };

        Ok(Self {
            validator: ReservationValidator::new(clock.clone()),
            slots: SlotGenerator::new(booking, clock)?,
            repos,
            sequencer,
            id_lock: Mutex::new(()),
            create_flight: SingleFlight::new("create reservation"),
            delete_flight: SingleFlight::new("delete reservation"),
        })
    }

    /// Share a sequencer (e.g. the seeder's) so both see the same issued ids.
    /// Switches the service to sequenced id assignment.
    pub fn with_sequencer(mut self, sequencer: Arc<IdentitySequencer>) -> Self {
        self.sequencer = Some(sequencer);
        self
    }

    pub fn slot_generator(&self) -> &SlotGenerator {
        &self.slots
    }

    // ── Queries ────────────────────────────────────────────────

    /// Restaurants ordered by name
    pub async fn list_restaurants(&self) -> DomainResult<Vec<RestaurantItem>> {
        let restaurants = self.repos.restaurants().list().await?;
        Ok(restaurants
            .into_iter()
            .map(|r| RestaurantItem {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    /// Bookable slots for `day`; may be empty.
    pub fn available_slots(&self, day: NaiveDate) -> Vec<DateTime<Utc>> {
        self.slots.generate_slots(day)
    }

    /// Validate a booking form without touching the store.
    pub fn check(
        &self,
        restaurant_id: Option<i32>,
        at: Option<DateTime<Utc>>,
        party_size: Option<i32>,
    ) -> ValidationResult {
        self.validator.validate_create(restaurant_id, at, party_size)
    }

    #[instrument(skip(self, cancel), fields(user_id = session.user_id))]
    pub async fn list_for_user(
        &self,
        session: &Session,
        cancel: &CancellationToken,
    ) -> DomainResult<Vec<ReservationSummary>> {
        ensure_not_cancelled(cancel)?;
        let reservations = self.repos.reservations().list_by_user(session.user_id).await?;
        ensure_not_cancelled(cancel)?;
        self.with_restaurant_names(reservations).await
    }

    #[instrument(skip(self, cancel), fields(user_id = session.user_id))]
    pub async fn list_for_user_by_status(
        &self,
        session: &Session,
        status: ReservationStatus,
        cancel: &CancellationToken,
    ) -> DomainResult<Vec<ReservationSummary>> {
        ensure_not_cancelled(cancel)?;
        let reservations = self
            .repos
            .reservations()
            .list_by_user_and_status(session.user_id, status)
            .await?;
        ensure_not_cancelled(cancel)?;
        self.with_restaurant_names(reservations).await
    }

    /// One restaurant query for the whole list. Unknown restaurants show as `#<id>`.
    async fn with_restaurant_names(
        &self,
        reservations: Vec<Reservation>,
    ) -> DomainResult<Vec<ReservationSummary>> {
        let ids: Vec<i32> = reservations
            .iter()
            .map(|r| r.restaurant_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let names: HashMap<i32, String> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.repos
                .restaurants()
                .find_by_ids(&ids)
                .await?
                .into_iter()
                .map(|r| (r.id, r.name))
                .collect()
        };

        Ok(reservations
            .into_iter()
            .map(|r| {
                let name = names
                    .get(&r.restaurant_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", r.restaurant_id));
                ReservationSummary::from_parts(r, name)
            })
            .collect())
    }

    // ── Commands ───────────────────────────────────────────────

    /// Book a table for the session's user.
    ///
    /// Rejected requests come back as `ValidationFailed` listing every
    /// broken rule, or `NotFound` for an unknown restaurant. Store errors
    /// come back as `PersistenceFailed` and are not retried.
    #[instrument(skip(self, cancel), fields(user_id = session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        restaurant_id: i32,
        at: DateTime<Utc>,
        party_size: i32,
        cancel: &CancellationToken,
    ) -> DomainResult<ReservationSummary> {
        let _flight = self.create_flight.try_begin()?;

        self.validator
            .validate_create(Some(restaurant_id), Some(at), Some(party_size))
            .into_result()
            .inspect_err(|e| debug!(error = %e, "Booking rejected"))?;

        let restaurant = self
            .repos
            .restaurants()
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Restaurant",
                field: "id",
                value: restaurant_id.to_string(),
            })?;

        ensure_not_cancelled(cancel)?;

        let record = NewReservation::confirmed(session.user_id, restaurant.id, at, party_size);
        let created = self.persist(record).await.inspect_err(|e| {
            warn!(error = %e, "Failed to persist reservation");
        })?;

        info!(
            reservation_id = created.id,
            restaurant = %restaurant.name,
            at = %created.at,
            party_size = created.party_size,
            "Reservation created"
        );
        Ok(ReservationSummary::from_parts(created, restaurant.name))
    }

    async fn persist(&self, record: NewReservation) -> DomainResult<Reservation> {
        match &self.sequencer {
            None => self.repos.reservations().insert(record).await,
            Some(sequencer) => {
                let _serial = self.id_lock.lock().await;
                let id = sequencer.next_id(EntityClass::Reservation).await?;
                self.repos.reservations().insert(record.with_id(id)).await
            }
        }
    }

    /// Delete one of the caller's reservations.
    ///
    /// A missing reservation counts as already deleted. Someone else's
    /// reservation is refused with `Unauthorized` and left untouched.
    #[instrument(skip(self, cancel), fields(user_id = session.user_id))]
    pub async fn delete(
        &self,
        session: &Session,
        reservation_id: i32,
        cancel: &CancellationToken,
    ) -> DomainResult<()> {
        let _flight = self.delete_flight.try_begin()?;

        let Some(existing) = self.repos.reservations().find_by_id(reservation_id).await? else {
            debug!(reservation_id, "Reservation already gone");
            return Ok(());
        };

        if !session.owns(existing.user_id) {
            warn!(
                reservation_id,
                owner = existing.user_id,
                "Refusing to delete another user's reservation"
            );
            return Err(DomainError::Unauthorized(
                "You can only delete your own reservations.".to_string(),
            ));
        }

        ensure_not_cancelled(cancel)?;

        self.repos.reservations().delete(reservation_id).await.inspect_err(|e| {
            warn!(error = %e, reservation_id, "Failed to delete reservation");
        })?;
        info!(reservation_id, "Reservation deleted");
        Ok(())
    }
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> DomainResult<()> {
    if cancel.is_cancelled() {
        return Err(DomainError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::seeding::SeedCoordinator;
    use crate::domain::community::CommunityRepository;
    use crate::domain::reservation::ReservationRepository;
    use crate::domain::restaurant::RestaurantRepository;
    use crate::domain::user::UserRepository;
    use crate::domain::{FixedClock, Restaurant};
    use crate::infrastructure::crypto::password::MIN_COST;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::infrastructure::{InMemoryRepositoryProvider, SeaOrmRepositoryProvider};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveTime, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ALICE: i32 = 10_000_001;
    const BOB: i32 = 10_000_002;
    const OCEAN_VIEW: i32 = 20_000_001;
    const MOUNTAIN_TOP: i32 = 20_000_002;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    fn tomorrow_at(h: u32) -> DateTime<Utc> {
        (now() + Duration::days(1))
            .date_naive()
            .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap())
            .and_utc()
    }

    async fn seed_and_serve(
        repos: Arc<dyn RepositoryProvider>,
        booking: &BookingConfig,
    ) -> ReservationService {
        let clock: SharedClock = Arc::new(FixedClock::new(now()));
        SeedCoordinator::new(repos.clone(), clock.clone())
            .with_password_cost(MIN_COST)
            .ensure_seeded()
            .await
            .unwrap();
        ReservationService::new(repos, clock, booking).unwrap()
    }

    async fn seeded(booking: BookingConfig) -> (Arc<InMemoryRepositoryProvider>, ReservationService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = seed_and_serve(repos.clone(), &booking).await;
        (repos, service)
    }

    async fn seeded_sqlite(booking: BookingConfig) -> ReservationService {
        let db = init_database(&DatabaseConfig::memory()).await.unwrap();
        seed_and_serve(Arc::new(SeaOrmRepositoryProvider::new(db)), &booking).await
    }

    fn alice() -> Session {
        Session::new(ALICE, "alice")
    }

    #[tokio::test]
    async fn booking_scenario_end_to_end() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();

        let created = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(19), 2, &cancel)
            .await
            .unwrap();
        assert_eq!(created.status, ReservationStatus::Confirmed);
        assert_eq!(created.restaurant_name, "Ocean View Grill");
        assert_eq!(created.user_id, ALICE);

        let mine = service.list_for_user(&alice(), &cancel).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[1].id, created.id);
        assert!(mine[0].at < mine[1].at);
    }

    async fn assert_ids_never_reused(service: ReservationService) {
        let cancel = CancellationToken::new();

        let first = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(12), 2, &cancel)
            .await
            .unwrap();
        assert_eq!(first.id, 50_000_003);

        service.delete(&alice(), first.id, &cancel).await.unwrap();

        let second = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(13), 2, &cancel)
            .await
            .unwrap();
        assert_eq!(second.id, 50_000_004);
    }

    fn sequenced() -> BookingConfig {
        BookingConfig {
            id_assignment: IdAssignment::Sequenced,
            ..BookingConfig::default()
        }
    }

    #[tokio::test]
    async fn native_ids_are_monotonic() {
        assert_ids_never_reused(seeded(BookingConfig::default()).await.1).await;
        assert_ids_never_reused(seeded_sqlite(BookingConfig::default()).await).await;
    }

    #[tokio::test]
    async fn sequenced_ids_are_monotonic() {
        assert_ids_never_reused(seeded(sequenced()).await.1).await;
        assert_ids_never_reused(seeded_sqlite(sequenced()).await).await;
    }

    async fn assert_ids_survive_restart(booking: BookingConfig, name: &str) {
        let path = std::env::temp_dir().join(format!(
            "dineconnect-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
        };
        let cancel = CancellationToken::new();

        let first = {
            let db = init_database(&config).await.unwrap();
            let service = seed_and_serve(Arc::new(SeaOrmRepositoryProvider::new(db)), &booking).await;
            let first = service
                .create(&alice(), OCEAN_VIEW, tomorrow_at(12), 2, &cancel)
                .await
                .unwrap();
            service.delete(&alice(), first.id, &cancel).await.unwrap();
            first.id
        };
        assert_eq!(first, 50_000_003);

        // New connection and new sequencer, as after a restart.
        let db = init_database(&config).await.unwrap();
        let service = seed_and_serve(Arc::new(SeaOrmRepositoryProvider::new(db)), &booking).await;
        let second = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(13), 2, &cancel)
            .await
            .unwrap();
        assert_eq!(second.id, 50_000_004);

        drop(service);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn sequenced_ids_are_not_reused_after_restart() {
        assert_ids_survive_restart(sequenced(), "sequenced-restart").await;
    }

    #[tokio::test]
    async fn native_ids_are_not_reused_after_restart() {
        assert_ids_survive_restart(BookingConfig::default(), "native-restart").await;
    }

    #[tokio::test]
    async fn invalid_request_lists_every_rule_and_writes_nothing() {
        let (repos, service) = seeded(BookingConfig::default()).await;
        let before = repos.reservations().count().await.unwrap();

        let err = service
            .create(&alice(), 0, now() - Duration::hours(1), 13, &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            DomainError::ValidationFailed(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(repos.reservations().count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_restaurant_is_not_found() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let err = service
            .create(&alice(), 29_999_999, tomorrow_at(19), 2, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "Restaurant", .. }));
        assert_eq!(err.user_message(), "Restaurant #29999999 not found.");
    }

    #[tokio::test]
    async fn delete_of_someone_elses_reservation_is_unauthorized() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();
        let bob = Session::new(BOB, "bob");

        let bobs = service.list_for_user(&bob, &cancel).await.unwrap();
        let target = bobs[0].id;

        let err = service.delete(&alice(), target, &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let still = service.list_for_user(&bob, &cancel).await.unwrap();
        assert!(still.iter().any(|r| r.id == target));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();
        let mine = service.list_for_user(&alice(), &cancel).await.unwrap();

        service.delete(&alice(), mine[0].id, &cancel).await.unwrap();
        service.delete(&alice(), mine[0].id, &cancel).await.unwrap();
        service.delete(&alice(), 12345, &cancel).await.unwrap();

        assert!(service.list_for_user(&alice(), &cancel).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_filter() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();
        let bob = Session::new(BOB, "bob");

        let pending = service
            .list_for_user_by_status(&bob, ReservationStatus::Pending, &cancel)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].restaurant_name, "Mountain Top Diner");
        assert_eq!(pending[0].restaurant_id, MOUNTAIN_TOP);

        let confirmed = service
            .list_for_user_by_status(&bob, ReservationStatus::Confirmed, &cancel)
            .await
            .unwrap();
        assert!(confirmed.is_empty());
    }

    #[tokio::test]
    async fn overlapping_calls_are_rejected_as_busy() {
        let (repos, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();

        {
            let _running = service.create_flight.try_begin().unwrap();
            let err = service
                .create(&alice(), OCEAN_VIEW, tomorrow_at(19), 2, &cancel)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Busy("create reservation")));
        }
        assert_eq!(repos.reservations().count().await.unwrap(), 2);

        let seeded_id = repos.reservations().list_by_user(ALICE).await.unwrap()[0].id;
        {
            let _running = service.delete_flight.try_begin().unwrap();
            let err = service.delete(&alice(), seeded_id, &cancel).await.unwrap_err();
            assert!(matches!(err, DomainError::Busy("delete reservation")));
        }
        assert!(repos.reservations().find_by_id(seeded_id).await.unwrap().is_some());

        // Once the running call is done the next one goes through.
        service.delete(&alice(), seeded_id, &cancel).await.unwrap();
        assert!(repos.reservations().find_by_id(seeded_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancelled_delete_keeps_the_record() {
        let (repos, service) = seeded(BookingConfig::default()).await;
        let seeded_id = repos.reservations().list_by_user(ALICE).await.unwrap()[0].id;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service.delete(&alice(), seeded_id, &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert!(repos.reservations().find_by_id(seeded_id).await.unwrap().is_some());
    }

    /// Reservation store whose writes always fail.
    #[derive(Default)]
    struct RejectingReservations {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl ReservationRepository for RejectingReservations {
        async fn insert(&self, _: NewReservation) -> DomainResult<Reservation> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::PersistenceFailed("database is locked".to_string()))
        }

        async fn insert_many(&self, _: Vec<NewReservation>) -> DomainResult<()> {
            Ok(())
        }

        async fn find_by_id(&self, _: i32) -> DomainResult<Option<Reservation>> {
            Ok(None)
        }

        async fn list_by_user(&self, _: i32) -> DomainResult<Vec<Reservation>> {
            Ok(Vec::new())
        }

        async fn list_by_user_and_status(
            &self,
            _: i32,
            _: ReservationStatus,
        ) -> DomainResult<Vec<Reservation>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _: i32) -> DomainResult<bool> {
            Ok(false)
        }

        async fn count(&self) -> DomainResult<u64> {
            Ok(0)
        }

        async fn max_id(&self) -> DomainResult<Option<i32>> {
            Ok(None)
        }

        async fn high_water(&self) -> DomainResult<Option<i32>> {
            Ok(None)
        }
    }

    struct ReadOnlyStore {
        inner: InMemoryRepositoryProvider,
        reservations: RejectingReservations,
    }

    #[async_trait]
    impl RepositoryProvider for ReadOnlyStore {
        fn reservations(&self) -> &dyn ReservationRepository {
            &self.reservations
        }

        fn restaurants(&self) -> &dyn RestaurantRepository {
            self.inner.restaurants()
        }

        fn users(&self) -> &dyn UserRepository {
            self.inner.users()
        }

        fn community(&self) -> &dyn CommunityRepository {
            self.inner.community()
        }

        async fn ensure_schema(&self) -> DomainResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failure_is_reported_verbatim_and_not_retried() {
        let store = Arc::new(ReadOnlyStore {
            inner: InMemoryRepositoryProvider::new(),
            reservations: RejectingReservations::default(),
        });
        store
            .inner
            .restaurants()
            .insert_many(vec![Restaurant {
                id: OCEAN_VIEW,
                name: "Ocean View Grill".into(),
                address: "123 Beach Ave".into(),
                lat: 35.556,
                lng: -120.678,
                phone: None,
            }])
            .await
            .unwrap();

        let clock: SharedClock = Arc::new(FixedClock::new(now()));
        let service = ReservationService::new(store.clone(), clock, &BookingConfig::default()).unwrap();

        let err = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(19), 2, &CancellationToken::new())
            .await
            .unwrap_err();

        match &err {
            DomainError::PersistenceFailed(msg) => assert_eq!(msg, "database is locked"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.reservations.attempts.load(Ordering::SeqCst), 1);
        assert!(!err.is_client_correctable());
    }

    #[tokio::test]
    async fn cancelled_create_writes_nothing() {
        let (repos, service) = seeded(BookingConfig::default()).await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service
            .create(&alice(), OCEAN_VIEW, tomorrow_at(19), 2, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert_eq!(repos.reservations().count().await.unwrap(), 2);

        assert!(matches!(
            service.list_for_user(&alice(), &cancel).await,
            Err(DomainError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn restaurants_are_listed_by_name() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let items = service.list_restaurants().await.unwrap();
        let names: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["Mountain Top Diner", "Ocean View Grill"]);
    }

    #[tokio::test]
    async fn unknown_restaurant_name_falls_back_to_id() {
        let (repos, service) = seeded(BookingConfig::default()).await;
        repos
            .reservations()
            .insert(NewReservation::confirmed(ALICE, 20_000_777, tomorrow_at(20), 3))
            .await
            .unwrap();

        let mine = service.list_for_user(&alice(), &CancellationToken::new()).await.unwrap();
        assert!(mine.iter().any(|r| r.restaurant_name == "#20000777"));
    }

    #[tokio::test]
    async fn slots_and_check_use_injected_clock() {
        let (_, service) = seeded(BookingConfig::default()).await;
        let today = service.available_slots(now().date_naive());
        assert_eq!(today.first().copied(), Some(now() + Duration::hours(1)));

        assert!(service.check(Some(OCEAN_VIEW), Some(tomorrow_at(19)), Some(2)).is_valid());
        assert!(!service.check(Some(OCEAN_VIEW), Some(now()), Some(2)).is_valid());
    }
}
