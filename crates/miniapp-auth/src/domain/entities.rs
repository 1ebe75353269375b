//! # Domain Entities
//!
//! Core data structures for launch-payload authentication.
//!
//! `AuthContext` and `UserIdentity` are derived, short-lived, and owned by a
//! single request's processing; `Profile` is owned by the external store
//! across requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// User identity as declared by the platform client inside the `user` field.
///
/// `id` is the stable numeric key; everything else is optional and may be
/// absent depending on the client version and user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable numeric identity, the profile primary key
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: Option<bool>,
}

/// Wire shape of the `user` JSON. The platform adds fields over time
/// (`allows_write_to_pm`, ...), so unknown keys must not break parsing,
/// and a missing `id` must be reported distinctly from malformed JSON.
#[derive(Deserialize)]
struct UserWire {
    id: Option<i64>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    language_code: Option<String>,
    #[serde(default)]
    is_premium: Option<bool>,
}

impl UserIdentity {
    /// Parse the JSON-encoded `user` field.
    ///
    /// # Errors
    /// * `ValidationError::MalformedUserJson` - the value is not valid JSON
    ///   for an identity object
    /// * `ValidationError::MissingUserId` - the object has no `id`
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let wire: UserWire = serde_json::from_str(raw)
            .map_err(|e| ValidationError::MalformedUserJson(e.to_string()))?;

        let id = wire.id.ok_or(ValidationError::MissingUserId)?;

        Ok(Self {
            id,
            username: wire.username,
            first_name: wire.first_name,
            last_name: wire.last_name,
            photo_url: wire.photo_url,
            language_code: wire.language_code,
            is_premium: wire.is_premium,
        })
    }
}

/// Verified view over the payload's fields, built only after the signature
/// check has passed. The `hash` field never appears here; it is consumed
/// during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user: UserIdentity,
    /// Declared signing time, unix seconds
    pub auth_date: u64,
    pub query_id: Option<String>,
    pub chat_instance: Option<String>,
    pub chat_type: Option<String>,
    pub start_param: Option<String>,
    /// Fields the platform sent that this core does not interpret.
    /// They participated in the canonical string and are preserved as-is.
    pub extras: BTreeMap<String, String>,
}

impl AuthContext {
    /// Build the context from the decoded, hash-free field set.
    ///
    /// `user.id` and `auth_date` must both be present; absence of either is
    /// a validation failure, not a signature failure.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let auth_date_raw = fields
            .get("auth_date")
            .ok_or(ValidationError::MissingAuthDate)?;
        let auth_date = auth_date_raw
            .parse::<u64>()
            .map_err(|_| ValidationError::MalformedAuthDate)?;

        let user_raw = fields.get("user").ok_or(ValidationError::MissingUserId)?;
        let user = UserIdentity::from_json(user_raw)?;

        let mut extras = BTreeMap::new();
        for (key, value) in fields {
            match key.as_str() {
                "auth_date" | "user" | "query_id" | "chat_instance" | "chat_type"
                | "start_param" => {}
                _ => {
                    extras.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Self {
            user,
            auth_date,
            query_id: fields.get("query_id").cloned(),
            chat_instance: fields.get("chat_instance").cloned(),
            chat_type: fields.get("chat_type").cloned(),
            start_param: fields.get("start_param").cloned(),
            extras,
        })
    }
}

/// Persisted profile row. Exactly one row exists per `id`; repeated upserts
/// converge to the latest submitted field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub language_code: Option<String>,
    /// Coerced absent-to-false at the persistence boundary
    pub is_premium: bool,
    /// Upsert time, unix seconds, set by the store
    pub updated_at: u64,
}

impl Profile {
    /// Project an identity onto the persisted shape.
    pub fn from_identity(user: &UserIdentity, updated_at: u64) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            photo_url: user.photo_url.clone(),
            language_code: user.language_code.clone(),
            is_premium: user.is_premium.unwrap_or(false),
            updated_at,
        }
    }
}

/// Successful authentication outcome: the verified identity plus the
/// persisted profile.
#[derive(Debug, Clone)]
pub struct VerifiedLaunch {
    pub user: UserIdentity,
    /// Full payload context; absent on the bypass path, which has no payload
    pub context: Option<AuthContext>,
    pub profile: Profile,
    /// True when produced by the development bypass
    pub bypass: bool,
}

impl VerifiedLaunch {
    /// Outcome of the verified path.
    pub fn verified(context: AuthContext, profile: Profile) -> Self {
        Self {
            user: context.user.clone(),
            context: Some(context),
            profile,
            bypass: false,
        }
    }

    /// Outcome of the development bypass path.
    #[cfg(feature = "dev-bypass")]
    pub fn bypassed(user: UserIdentity, profile: Profile) -> Self {
        Self {
            user,
            context: None,
            profile,
            bypass: true,
        }
    }
}
