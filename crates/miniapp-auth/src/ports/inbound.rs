//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::entities::VerifiedLaunch;
use crate::domain::errors::AuthError;

/// Primary launch-authentication API.
///
/// This is the single entry point for authenticating a launch payload.
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait LaunchAuthApi: Send + Sync {
    /// Authenticate an opaque launch payload and reconcile the profile row.
    ///
    /// On success returns the verified identity together with the persisted
    /// profile. Every error is terminal for this request; the caller must
    /// resubmit a freshly signed payload.
    async fn authenticate(&self, raw_payload: &str) -> Result<VerifiedLaunch, AuthError>;
}
