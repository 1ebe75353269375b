//! # Launch Authentication Service
//!
//! Application service layer that implements the [`LaunchAuthApi`] trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`LaunchAuthApi`)
//! - Uses the outbound port (`ProfileStore`) for the profile upsert
//! - Delegates canonicalization, MAC, and freshness checks to the domain
//!   layer
//!
//! The verified flow is canonicalize → verify signature → extract context →
//! freshness → upsert. Every rejection is terminal; the service never
//! retries, the caller must resubmit a freshly signed payload.

use tracing::{debug, info, warn};

use crate::config::{AuthConfig, AuthMode, SecretToken};
use crate::domain::canonical;
use crate::domain::entities::{AuthContext, VerifiedLaunch};
use crate::domain::errors::AuthError;
use crate::domain::freshness::current_timestamp;
use crate::domain::signature;
use crate::ports::inbound::LaunchAuthApi;
use crate::ports::outbound::ProfileStore;

#[cfg(feature = "dev-bypass")]
use crate::domain::entities::UserIdentity;

/// Launch authentication service.
///
/// Holds the immutable startup configuration and the profile store; both
/// are read-only across concurrent requests.
pub struct LaunchAuthService<P: ProfileStore> {
    config: AuthConfig,
    store: P,
}

impl<P: ProfileStore> LaunchAuthService<P> {
    /// Create a new service over a profile store.
    pub fn new(config: AuthConfig, store: P) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    async fn verify_and_persist(
        &self,
        token: &SecretToken,
        raw_payload: &str,
    ) -> Result<VerifiedLaunch, AuthError> {
        let canonical = canonical::canonicalize(raw_payload)?;

        let verdict = signature::verify(
            token.reveal(),
            &canonical.data_check_string,
            &canonical.claimed_hash,
        )?;

        if self.config.debug_log_macs {
            debug!(
                computed = %verdict.computed_hex(),
                claimed = %canonical.claimed_hash,
                "launch MAC comparison"
            );
        }

        if !verdict.is_match {
            return Err(AuthError::InvalidSignature);
        }

        let context = AuthContext::from_fields(&canonical.fields)?;

        let now = current_timestamp();
        self.config.freshness.check(context.auth_date, now)?;
        if context.auth_date > now {
            warn!(
                user_id = context.user.id,
                ahead_secs = context.auth_date - now,
                "accepted future-dated auth_date within skew tolerance"
            );
        }

        let profile = self
            .store
            .upsert(&context.user)
            .await
            .map_err(|e| AuthError::Upsert(e.to_string()))?;

        info!(user_id = profile.id, "launch verified, profile reconciled");
        Ok(VerifiedLaunch::verified(context, profile))
    }

    /// Development bypass: substitute the configured identity and skip
    /// verification, but run the identical upsert step for environment
    /// parity.
    #[cfg(feature = "dev-bypass")]
    async fn bypass(&self, identity: &UserIdentity) -> Result<VerifiedLaunch, AuthError> {
        warn!(
            user_id = identity.id,
            "development bypass active, skipping signature verification"
        );

        let profile = self
            .store
            .upsert(identity)
            .await
            .map_err(|e| AuthError::Upsert(e.to_string()))?;

        Ok(VerifiedLaunch::bypassed(identity.clone(), profile))
    }
}

#[async_trait::async_trait]
impl<P: ProfileStore> LaunchAuthApi for LaunchAuthService<P> {
    async fn authenticate(&self, raw_payload: &str) -> Result<VerifiedLaunch, AuthError> {
        match &self.config.mode {
            AuthMode::Live(token) => self.verify_and_persist(token, raw_payload).await,
            #[cfg(feature = "dev-bypass")]
            AuthMode::DevBypass(identity) => self.bypass(identity).await,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
