//! # Mini-App Auth Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Payload builders and fixture signing
//! └── integration/      # Cross-component flows through the public API
//!     ├── launch_flow.rs
//!     └── bypass_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p miniapp-tests
//!
//! # By category
//! cargo test -p miniapp-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;
