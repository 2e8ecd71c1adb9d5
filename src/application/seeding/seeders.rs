//! Baseline data, one seeder per entity class.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::application::booking::IdentitySequencer;
use crate::domain::{
    Comment, DomainResult, EntityClass, Favorite, NewReservation, Post, RepositoryProvider,
    ReservationStatus, Restaurant, User,
};
use crate::infrastructure::crypto::password::hash_password_with_cost;
use crate::shared::errors::InfraError;

pub struct SeedContext<'a> {
    pub repos: &'a dyn RepositoryProvider,
    pub sequencer: &'a IdentitySequencer,
    pub now: DateTime<Utc>,
    pub password_cost: u32,
}

/// Inserts a fixed baseline for one entity class.
#[async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Records of this class already in the store
    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64>;

    /// Insert the baseline; returns how many records were written.
    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize>;
}

pub fn default_seeders() -> Vec<Box<dyn Seeder>> {
    vec![
        Box::new(UserSeeder),
        Box::new(RestaurantSeeder),
        Box::new(PostSeeder),
        Box::new(CommentSeeder),
        Box::new(ReservationSeeder),
        Box::new(FavoriteSeeder),
    ]
}

// ── Lookups ────────────────────────────────────────────────────

async fn user_id(repos: &dyn RepositoryProvider, username: &str) -> DomainResult<Option<i32>> {
    let user = repos.users().find_by_username(username).await?;
    if user.is_none() {
        warn!(username, "Seed user missing; dependent record skipped");
    }
    Ok(user.map(|u| u.id))
}

fn restaurant_id(restaurants: &[Restaurant], name: &str) -> Option<i32> {
    let id = restaurants.iter().find(|r| r.name == name).map(|r| r.id);
    if id.is_none() {
        warn!(restaurant = name, "Seed restaurant missing; dependent record skipped");
    }
    id
}

// ── Users ──────────────────────────────────────────────────────

pub struct UserSeeder;

const SEED_USERS: [(&str, &str); 2] = [("alice", "hash123"), ("bob", "hash456")];

#[async_trait]
impl Seeder for UserSeeder {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.users().count().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let ids = ctx.sequencer.next_ids(EntityClass::User, SEED_USERS.len()).await?;

        let mut users = Vec::with_capacity(SEED_USERS.len());
        for (id, (username, password)) in ids.into_iter().zip(SEED_USERS) {
            let password_hash =
                hash_password_with_cost(password, ctx.password_cost).map_err(InfraError::from)?;
            users.push(User {
                id,
                username: username.to_string(),
                password_hash,
            });
        }

        let n = users.len();
        ctx.repos.users().insert_many(users).await?;
        Ok(n)
    }
}

// ── Restaurants ────────────────────────────────────────────────

pub struct RestaurantSeeder;

#[async_trait]
impl Seeder for RestaurantSeeder {
    fn name(&self) -> &'static str {
        "restaurants"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.restaurants().count().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let ids = ctx.sequencer.next_ids(EntityClass::Restaurant, 2).await?;
        let restaurants = vec![
            Restaurant {
                id: ids[0],
                name: "Ocean View Grill".into(),
                address: "123 Beach Ave".into(),
                lat: 35.556,
                lng: -120.678,
                phone: Some("555-1234".into()),
            },
            Restaurant {
                id: ids[1],
                name: "Mountain Top Diner".into(),
                address: "789 Hill Road".into(),
                lat: 40.123,
                lng: -105.456,
                phone: Some("555-9876".into()),
            },
        ];

        let n = restaurants.len();
        ctx.repos.restaurants().insert_many(restaurants).await?;
        Ok(n)
    }
}

// ── Posts ──────────────────────────────────────────────────────

pub struct PostSeeder;

const SEED_POSTS: [(&str, &str, &str); 2] = [
    ("alice", "Amazing Seafood!", "Had a great time at Ocean View Grill!"),
    ("bob", "Love this place", "Mountain Top Diner has the coziest vibe!"),
];

#[async_trait]
impl Seeder for PostSeeder {
    fn name(&self) -> &'static str {
        "posts"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.community().count_posts().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let mut posts = Vec::new();
        for (author, title, content) in SEED_POSTS {
            let Some(user_id) = user_id(ctx.repos, author).await? else {
                continue;
            };
            posts.push(Post {
                id: 0,
                user_id,
                title: title.to_string(),
                content: content.to_string(),
            });
        }

        let ids = ctx.sequencer.next_ids(EntityClass::Post, posts.len()).await?;
        for (post, id) in posts.iter_mut().zip(ids) {
            post.id = id;
        }

        let n = posts.len();
        ctx.repos.community().insert_posts(posts).await?;
        Ok(n)
    }
}

// ── Comments ───────────────────────────────────────────────────

pub struct CommentSeeder;

/// (author, title of the post commented on, content)
const SEED_COMMENTS: [(&str, &str, &str); 2] = [
    ("bob", "Amazing Seafood!", "Totally agree! Their shrimp is the best."),
    ("alice", "Love this place", "Thanks! I need to try that diner too."),
];

#[async_trait]
impl Seeder for CommentSeeder {
    fn name(&self) -> &'static str {
        "comments"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.community().count_comments().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let posts = ctx.repos.community().list_posts().await?;

        let mut comments = Vec::new();
        for (author, post_title, content) in SEED_COMMENTS {
            let Some(user_id) = user_id(ctx.repos, author).await? else {
                continue;
            };
            let Some(post) = posts.iter().find(|p| p.title == post_title) else {
                warn!(post = post_title, "Seed post missing; comment skipped");
                continue;
            };
            comments.push(Comment {
                id: 0,
                user_id,
                post_id: post.id,
                content: content.to_string(),
            });
        }

        let ids = ctx.sequencer.next_ids(EntityClass::Comment, comments.len()).await?;
        for (comment, id) in comments.iter_mut().zip(ids) {
            comment.id = id;
        }

        let n = comments.len();
        ctx.repos.community().insert_comments(comments).await?;
        Ok(n)
    }
}

// ── Reservations ───────────────────────────────────────────────

pub struct ReservationSeeder;

/// (guest, restaurant, days from now, party size, status)
const SEED_RESERVATIONS: [(&str, &str, i64, i32, ReservationStatus); 2] = [
    ("alice", "Ocean View Grill", 1, 2, ReservationStatus::Confirmed),
    ("bob", "Mountain Top Diner", 2, 4, ReservationStatus::Pending),
];

#[async_trait]
impl Seeder for ReservationSeeder {
    fn name(&self) -> &'static str {
        "reservations"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.reservations().count().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let restaurants = ctx.repos.restaurants().list().await?;

        let mut records = Vec::new();
        for (guest, restaurant, days, party_size, status) in SEED_RESERVATIONS {
            let Some(user_id) = user_id(ctx.repos, guest).await? else {
                continue;
            };
            let Some(restaurant_id) = restaurant_id(&restaurants, restaurant) else {
                continue;
            };
            records.push(
                NewReservation::confirmed(
                    user_id,
                    restaurant_id,
                    ctx.now + Duration::days(days),
                    party_size,
                )
                .with_status(status),
            );
        }

        let ids = ctx
            .sequencer
            .next_ids(EntityClass::Reservation, records.len())
            .await?;
        let records: Vec<NewReservation> = records
            .into_iter()
            .zip(ids)
            .map(|(r, id)| r.with_id(id))
            .collect();

        let n = records.len();
        ctx.repos.reservations().insert_many(records).await?;
        Ok(n)
    }
}

// ── Favorites ──────────────────────────────────────────────────

pub struct FavoriteSeeder;

const SEED_FAVORITES: [(&str, &str, i32); 2] = [
    ("alice", "Mountain Top Diner", 5),
    ("bob", "Ocean View Grill", 3),
];

#[async_trait]
impl Seeder for FavoriteSeeder {
    fn name(&self) -> &'static str {
        "favorites"
    }

    async fn existing(&self, repos: &dyn RepositoryProvider) -> DomainResult<u64> {
        repos.community().count_favorites().await
    }

    async fn seed(&self, ctx: &SeedContext<'_>) -> DomainResult<usize> {
        let restaurants = ctx.repos.restaurants().list().await?;

        let mut favorites = Vec::new();
        for (username, restaurant, rating) in SEED_FAVORITES {
            let Some(user_id) = user_id(ctx.repos, username).await? else {
                continue;
            };
            let Some(restaurant_id) = restaurant_id(&restaurants, restaurant) else {
                continue;
            };
            favorites.push(Favorite {
                user_id,
                restaurant_id,
                rating,
            });
        }

        let n = favorites.len();
        ctx.repos.community().insert_favorites(favorites).await?;
        Ok(n)
    }
}
