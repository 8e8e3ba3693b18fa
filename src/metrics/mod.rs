//! Metrics and monitoring for the rally-pti service
//!
//! This module provides Prometheus metrics collection for calculations and
//! API requests.

pub mod collector;

pub use collector::{CalculationMetrics, MetricsCollector, MetricsTimer, RequestMetrics};
