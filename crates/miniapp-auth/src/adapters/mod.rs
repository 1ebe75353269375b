//! # Adapters Layer
//!
//! Infrastructure adapters implementing the outbound port.

pub mod memory;
