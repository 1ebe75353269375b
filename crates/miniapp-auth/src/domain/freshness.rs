//! # Freshness Gate
//!
//! Rejects payloads whose declared signing time falls outside the policy
//! window. The age boundary is inclusive: a payload exactly `max_age_secs`
//! old still passes, one second further back is stale. Future-dated
//! timestamps are tolerated up to a small skew bound and rejected beyond it.

use std::time::{SystemTime, UNIX_EPOCH};

use super::errors::AuthError;

/// Default maximum payload age (seconds).
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Default tolerance for future-dated timestamps (seconds).
pub const DEFAULT_MAX_FUTURE_SKEW_SECS: u64 = 10;

/// Freshness policy, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Maximum accepted age, inclusive
    pub max_age_secs: u64,
    /// Maximum accepted clock skew into the future, inclusive
    pub max_future_skew_secs: u64,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            max_future_skew_secs: DEFAULT_MAX_FUTURE_SKEW_SECS,
        }
    }
}

impl FreshnessPolicy {
    /// Check a declared signing time against this policy.
    ///
    /// Pure function of `(auth_date, now)`; the caller supplies the clock.
    ///
    /// # Errors
    /// * `AuthError::Stale` - `auth_date` is strictly more than
    ///   `max_age_secs` before `now`
    /// * `AuthError::FutureDated` - `auth_date` is strictly more than
    ///   `max_future_skew_secs` after `now`
    pub fn check(&self, auth_date: u64, now: u64) -> Result<(), AuthError> {
        if auth_date > now {
            let ahead_secs = auth_date - now;
            if ahead_secs > self.max_future_skew_secs {
                return Err(AuthError::FutureDated {
                    ahead_secs,
                    max_skew_secs: self.max_future_skew_secs,
                });
            }
            return Ok(());
        }

        let age_secs = now - auth_date;
        if age_secs > self.max_age_secs {
            return Err(AuthError::Stale {
                age_secs,
                max_age_secs: self.max_age_secs,
            });
        }

        Ok(())
    }
}

/// Returns the current unix timestamp in seconds.
///
/// Does not panic: a system clock before the epoch reads as 0.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
