//! # Mini-App Launch Authentication
//!
//! Verifies the signed launch payload a messaging-platform mini-app client
//! presents at session start, then reconciles a profile record keyed by the
//! stable numeric user id.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure canonicalization, HMAC, and freshness
//!   logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound
//!   interfaces
//! - **Adapters Layer** (`adapters/`): Infrastructure implementations of the
//!   outbound port
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Two-Stage Key Derivation**: The MAC key is
//!   `HMAC-SHA256("WebAppData", bot_token)`, never the raw token
//! - **Constant-Time Comparison**: Claimed and computed MACs compare without
//!   early exit to avoid leaking match position through timing
//! - **Secret Hygiene**: The bot token redacts itself from `Debug` output and
//!   zeroizes on drop; MAC material is only logged behind an explicit
//!   debug switch
//! - **Dev Bypass**: The bypass path only exists under the `dev-bypass`
//!   cargo feature and is selected by startup configuration, never by
//!   request data

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{AuthConfig, AuthMode, ConfigError, SecretToken};
pub use domain::canonical::{canonicalize, CanonicalPayload};
pub use domain::entities::{AuthContext, Profile, UserIdentity, VerifiedLaunch};
pub use domain::errors::{AuthError, ErrorClass, ValidationError};
pub use domain::freshness::FreshnessPolicy;
pub use ports::inbound::LaunchAuthApi;
pub use ports::outbound::{ProfileStore, StoreError};
pub use service::LaunchAuthService;
