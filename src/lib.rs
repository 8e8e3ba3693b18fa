//! Rally PTI - rating adjustment service for doubles league matches
//!
//! This crate provides the PTI (Player Tracking Index) adjustment calculator
//! and a small HTTP service exposing it as JSON, with health checks and
//! Prometheus metrics.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{PtiError, Result};
pub use types::*;

// Re-export key components
pub use rating::{compute_adjustment, AdjustmentCalculator, AdjustmentResult, PtiCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
