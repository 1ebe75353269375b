//! # Mini-App Auth Runtime
//!
//! The operational entry point for the launch authentication service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration from the environment (fails fast on a missing
//!    token, or on a missing substitute identity under `dev-bypass`)
//! 3. Wire the in-memory profile store to the service
//! 4. Authenticate payloads read from stdin, one per line, writing one JSON
//!    verdict per line to stdout
//!
//! The stdin driver keeps this binary transport-agnostic; an HTTP layer in
//! front of the service is a deployment concern, not part of this core.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use miniapp_auth::adapters::memory::InMemoryProfileStore;
use miniapp_auth::{AuthConfig, LaunchAuthApi, LaunchAuthService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    // Load configuration once; it is immutable for the process lifetime
    let config = AuthConfig::from_env().context("loading authentication configuration")?;
    info!(
        max_age_secs = config.freshness.max_age_secs,
        max_future_skew_secs = config.freshness.max_future_skew_secs,
        "configuration loaded"
    );

    let service = LaunchAuthService::new(config, InMemoryProfileStore::new());

    info!("reading launch payloads from stdin, one per line");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading launch payload from stdin")?;
        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }

        let verdict = match service.authenticate(payload).await {
            Ok(launch) => serde_json::json!({
                "ok": true,
                "dev": launch.bypass,
                "profile": launch.profile,
            }),
            Err(err) => serde_json::json!({
                "ok": false,
                "error": err.to_string(),
                "class": format!("{:?}", err.class()),
            }),
        };
        println!("{verdict}");
    }

    Ok(())
}
