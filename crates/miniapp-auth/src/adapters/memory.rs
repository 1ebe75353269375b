//! # In-Memory Profile Store
//!
//! Reference implementation of the [`ProfileStore`] port. Useful for the
//! development runtime and for tests; real deployments plug in an adapter
//! over their persistence engine.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::entities::{Profile, UserIdentity};
use crate::domain::freshness::current_timestamp;
use crate::ports::outbound::{ProfileStore, StoreError};

/// Profile store backed by a process-local map.
///
/// Each upsert takes the write lock for the duration of the single map
/// insert, which makes the call atomic; last write wins across concurrent
/// upserts for the same id.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    rows: RwLock<HashMap<i64, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored profile by id.
    pub async fn get(&self, id: i64) -> Option<Profile> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn upsert(&self, identity: &UserIdentity) -> Result<Profile, StoreError> {
        let profile = Profile::from_identity(identity, current_timestamp());

        let mut rows = self.rows.write().await;
        rows.insert(identity.id, profile.clone());

        Ok(profile)
    }
}
