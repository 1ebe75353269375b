//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this crate needs.

use thiserror::Error;

use crate::domain::entities::{Profile, UserIdentity};

/// Error from profile store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The upsert did not land
    #[error("upsert failed: {cause}")]
    UpsertFailed { cause: String },
}

/// Gateway to the durable profile store.
///
/// Contract: conflict resolution is keyed on `identity.id`, last write wins
/// per field, `updated_at` is set to the upsert time, and each call is
/// atomic (a single row affected). Ordering across concurrent upserts for
/// the same id is the store's own; this crate imposes none.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or update the profile row for this identity.
    ///
    /// # Errors
    /// * `StoreError::UpsertFailed` - the store rejected the write
    async fn upsert(&self, identity: &UserIdentity) -> Result<Profile, StoreError>;
}

// Shared stores are the common wiring shape; delegate through Arc so the
// service and its caller can both hold the store.
#[async_trait::async_trait]
impl<S: ProfileStore> ProfileStore for std::sync::Arc<S> {
    async fn upsert(&self, identity: &UserIdentity) -> Result<Profile, StoreError> {
        (**self).upsert(identity).await
    }
}
