//! # Authentication Errors
//!
//! Error types for launch-payload verification. Every variant is terminal
//! for the current request; the caller must resubmit a freshly signed
//! payload.

use thiserror::Error;

/// Failures while decoding or validating the raw payload fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload carries no `hash` field
    #[error("payload has no hash field")]
    MissingHash,

    /// The claimed hash is not valid hex (odd length or non-hex characters)
    #[error("claimed hash is not valid hex")]
    MalformedHash,

    /// The `user` field is not valid JSON for a user identity
    #[error("user field is not a valid identity: {0}")]
    MalformedUserJson(String),

    /// The payload carries no `user` id
    #[error("user identity has no id")]
    MissingUserId,

    /// The payload carries no `auth_date` field
    #[error("payload has no auth_date field")]
    MissingAuthDate,

    /// The `auth_date` field is not a unix timestamp
    #[error("auth_date is not a unix timestamp")]
    MalformedAuthDate,
}

/// Terminal errors produced by the authentication flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The payload failed field-level validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The claimed hash does not match the computed MAC
    #[error("launch payload signature does not match")]
    InvalidSignature,

    /// The payload's declared timestamp is older than the freshness window
    #[error("launch payload is stale: {age_secs}s old, window is {max_age_secs}s")]
    Stale { age_secs: u64, max_age_secs: u64 },

    /// The payload's declared timestamp is further in the future than the
    /// tolerated clock skew
    #[error("auth_date is {ahead_secs}s ahead of now, tolerance is {max_skew_secs}s")]
    FutureDated { ahead_secs: u64, max_skew_secs: u64 },

    /// The profile store rejected the upsert
    #[error("profile upsert failed: {0}")]
    Upsert(String),
}

/// Caller-visible classification of a terminal error.
///
/// Malformed or missing fields map to the client-error class, failed
/// signature or freshness checks to the unauthorized class, and store
/// failures to the server-error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    ClientError,
    Unauthorized,
    ServerError,
}

impl AuthError {
    /// Classify this error for the caller-facing status mapping.
    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::Validation(_) => ErrorClass::ClientError,
            AuthError::InvalidSignature | AuthError::Stale { .. } | AuthError::FutureDated { .. } => {
                ErrorClass::Unauthorized
            }
            AuthError::Upsert(_) => ErrorClass::ServerError,
        }
    }
}
