//! # Authentication Configuration
//!
//! One immutable configuration value, constructed at startup and passed
//! explicitly into the service. Nothing here is re-read per request.
//!
//! ## Security Requirements
//!
//! - The bot token is required in live mode and never logged; startup fails
//!   fast without it
//! - The development bypass only exists under the `dev-bypass` feature and
//!   must carry a fixed substitute identity, never proceed silently

use std::env;
use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "dev-bypass")]
use crate::domain::entities::UserIdentity;
use crate::domain::freshness::FreshnessPolicy;

/// Environment variable carrying the shared bot token.
pub const ENV_BOT_TOKEN: &str = "MINIAPP_BOT_TOKEN";
/// Freshness window override, seconds.
pub const ENV_MAX_AGE_SECS: &str = "MINIAPP_MAX_AGE_SECS";
/// Future-skew tolerance override, seconds.
pub const ENV_MAX_FUTURE_SKEW_SECS: &str = "MINIAPP_MAX_FUTURE_SKEW_SECS";
/// Opt-in switch for MAC diagnostics logging.
pub const ENV_DEBUG_LOG_MACS: &str = "MINIAPP_DEBUG_LOG_MACS";
/// Development bypass switch.
#[cfg(feature = "dev-bypass")]
pub const ENV_DEV_BYPASS: &str = "MINIAPP_DEV_BYPASS";
/// JSON identity substituted on the bypass path.
#[cfg(feature = "dev-bypass")]
pub const ENV_DEV_USER_JSON: &str = "MINIAPP_DEV_USER_JSON";

/// Configuration errors. All of them are startup-time; requests never see
/// them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No bot token configured in live mode
    #[error("MINIAPP_BOT_TOKEN is not set; cannot verify launch payloads without it")]
    MissingSecret,

    /// Bypass requested without a usable substitute identity
    #[cfg(feature = "dev-bypass")]
    #[error("dev bypass enabled but MINIAPP_DEV_USER_JSON is unusable: {0}")]
    MissingBypassIdentity(String),

    /// An override variable did not parse
    #[error("{name} is invalid: {cause}")]
    InvalidValue { name: &'static str, cause: String },
}

/// Shared bot token.
///
/// Redacts itself from `Debug` output and zeroizes its memory on drop; the
/// raw value is only reachable inside this crate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken(<redacted>)")
    }
}

/// How the service authenticates, fixed at startup.
///
/// The bypass variant is a deliberate trust-boundary override: it is
/// compiled only under the `dev-bypass` feature, so a production build has
/// no bypass code path at all.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Verify payload signatures with the shared bot token
    Live(SecretToken),
    /// Substitute the fixed identity and skip verification entirely
    #[cfg(feature = "dev-bypass")]
    DevBypass(UserIdentity),
}

/// Complete authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub freshness: FreshnessPolicy,
    /// When enabled, the computed and claimed MAC hex values are emitted at
    /// `debug` level for diagnostics. Never the token. Defaults to off.
    pub debug_log_macs: bool,
}

impl AuthConfig {
    /// Live-mode configuration with default policy.
    pub fn live(token: SecretToken) -> Self {
        Self {
            mode: AuthMode::Live(token),
            freshness: FreshnessPolicy::default(),
            debug_log_macs: false,
        }
    }

    /// Bypass-mode configuration with default policy.
    #[cfg(feature = "dev-bypass")]
    pub fn dev_bypass(identity: UserIdentity) -> Self {
        Self {
            mode: AuthMode::DevBypass(identity),
            freshness: FreshnessPolicy::default(),
            debug_log_macs: false,
        }
    }

    /// Load configuration from the environment, failing fast on anything
    /// unusable.
    ///
    /// # Errors
    /// * `ConfigError::MissingSecret` - live mode without a bot token
    /// * `ConfigError::MissingBypassIdentity` - bypass switch set without a
    ///   parseable substitute identity (feature `dev-bypass`)
    /// * `ConfigError::InvalidValue` - a numeric override did not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = Self::mode_from_env()?;

        let mut freshness = FreshnessPolicy::default();
        if let Some(secs) = read_u64(ENV_MAX_AGE_SECS)? {
            freshness.max_age_secs = secs;
        }
        if let Some(secs) = read_u64(ENV_MAX_FUTURE_SKEW_SECS)? {
            freshness.max_future_skew_secs = secs;
        }

        Ok(Self {
            mode,
            freshness,
            debug_log_macs: read_bool(ENV_DEBUG_LOG_MACS),
        })
    }

    fn mode_from_env() -> Result<AuthMode, ConfigError> {
        #[cfg(feature = "dev-bypass")]
        if read_bool(ENV_DEV_BYPASS) {
            let raw = env::var(ENV_DEV_USER_JSON)
                .map_err(|_| ConfigError::MissingBypassIdentity("not set".to_string()))?;
            let identity = UserIdentity::from_json(&raw)
                .map_err(|e| ConfigError::MissingBypassIdentity(e.to_string()))?;
            return Ok(AuthMode::DevBypass(identity));
        }

        let token = env::var(ENV_BOT_TOKEN)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        Ok(AuthMode::Live(SecretToken::new(token)))
    }
}

fn read_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                name,
                cause: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn read_bool(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
