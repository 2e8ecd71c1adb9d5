//! Integer id assignment for stores that do not generate ids themselves.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, EntityClass, RepositoryProvider};

/// Hands out `max(high_water, issued) + 1` per entity class.
///
/// The store's high-water mark covers deleted rows, including those deleted
/// by an earlier process, and the highest id issued here covers ids handed
/// out but not yet inserted. Callers that insert
/// with the returned id must serialize `next_id` + insert themselves when
/// several writers share one store.
pub struct IdentitySequencer {
    repos: Arc<dyn RepositoryProvider>,
    issued: Mutex<HashMap<EntityClass, i32>>,
}

impl IdentitySequencer {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            issued: Mutex::new(HashMap::new()),
        }
    }

    pub async fn next_id(&self, class: EntityClass) -> DomainResult<i32> {
        let mut ids = self.next_ids(class, 1).await?;
        ids.pop()
            .ok_or_else(|| DomainError::PersistenceFailed(format!("no id issued for {}", class)))
    }

    /// `count` consecutive ids, for seeding a batch.
    pub async fn next_ids(&self, class: EntityClass, count: usize) -> DomainResult<Vec<i32>> {
        let mut issued = self.issued.lock().await;

        let stored = self.repos.high_water(class).await?;
        let mut current = stored.unwrap_or_else(|| class.base_offset());
        if let Some(&high) = issued.get(&class) {
            current = current.max(high);
        }

        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            current = current.checked_add(1).ok_or_else(|| {
                DomainError::PersistenceFailed(format!("{} id space exhausted", class))
            })?;
            ids.push(current);
        }
        issued.insert(class, current);

        debug!(class = %class, stored_max = ?stored, issued = ?ids, "Issued ids");
        Ok(ids)
    }
}
