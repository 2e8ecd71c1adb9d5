//! Idempotent baseline seeding.
//!
//! Safe to call on every start-up and from every view: each entity class is
//! checked on its own and only seeded while it has no records at all.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::seeders::{default_seeders, SeedContext, Seeder};
use crate::application::booking::IdentitySequencer;
use crate::domain::{DomainResult, RepositoryProvider, SharedClock};

/// What one `ensure_seeded` call did, per entity class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// (class, records inserted)
    pub seeded: Vec<(&'static str, usize)>,
    /// Classes that already had data
    pub skipped: Vec<&'static str>,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty()
    }
}

pub struct SeedCoordinator {
    repos: Arc<dyn RepositoryProvider>,
    sequencer: Arc<IdentitySequencer>,
    clock: SharedClock,
    password_cost: u32,
    seeders: Vec<Box<dyn Seeder>>,
    /// Concurrent callers queue here instead of seeding twice.
    lock: Mutex<()>,
}

impl SeedCoordinator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self {
            sequencer: Arc::new(IdentitySequencer::new(repos.clone())),
            repos,
            clock,
            password_cost: bcrypt::DEFAULT_COST,
            seeders: default_seeders(),
            lock: Mutex::new(()),
        }
    }

    pub fn with_sequencer(mut self, sequencer: Arc<IdentitySequencer>) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn sequencer(&self) -> Arc<IdentitySequencer> {
        self.sequencer.clone()
    }

    /// Create the schema if needed, then seed every empty entity class.
    ///
    /// An error here means the store is unusable; callers treat it as fatal.
    pub async fn ensure_seeded(&self) -> DomainResult<SeedReport> {
        let _guard = self.lock.lock().await;

        self.repos.ensure_schema().await?;

        let ctx = SeedContext {
            repos: self.repos.as_ref(),
            sequencer: self.sequencer.as_ref(),
            now: self.clock.now(),
            password_cost: self.password_cost,
        };

        let mut report = SeedReport::default();
        for seeder in &self.seeders {
            let existing = seeder.existing(self.repos.as_ref()).await?;
            if existing > 0 {
                debug!(class = seeder.name(), existing, "Seed skipped, data present");
                report.skipped.push(seeder.name());
                continue;
            }

            let inserted = seeder.seed(&ctx).await.inspect_err(|e| {
                error!(class = seeder.name(), error = %e, "Seeding failed");
            })?;
            info!(class = seeder.name(), inserted, "Seeded baseline");
            report.seeded.push((seeder.name(), inserted));
        }

        Ok(report)
    }
}
