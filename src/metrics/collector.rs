//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the rally-pti service using
//! Prometheus metrics.

use crate::rating::AdjustmentResult;
use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the PTI service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Calculation metrics
    calculation_metrics: CalculationMetrics,

    /// HTTP request metrics
    request_metrics: RequestMetrics,
}

/// Calculation-related metrics
#[derive(Clone)]
pub struct CalculationMetrics {
    /// Total calculations by outcome for team A (win/loss)
    pub calculations_total: IntCounterVec,

    /// Fallbacks taken while reading inputs (score/experience)
    pub fallbacks_total: IntCounterVec,

    /// Time spent in the calculator
    pub calculation_duration: Histogram,

    /// Distribution of adjustment magnitudes
    pub adjustment_magnitude: Histogram,
}

/// HTTP request metrics
#[derive(Clone)]
pub struct RequestMetrics {
    /// Requests answered with `success: false`, by reason
    pub request_errors_total: IntCounterVec,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let calculation_metrics = CalculationMetrics::new(&registry)?;
        let request_metrics = RequestMetrics::new(&registry)?;

        Ok(Self {
            registry,
            calculation_metrics,
            request_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get calculation metrics
    pub fn calculation(&self) -> &CalculationMetrics {
        &self.calculation_metrics
    }

    /// Get request metrics
    pub fn request(&self) -> &RequestMetrics {
        &self.request_metrics
    }

    /// Record a finished calculation
    pub fn record_calculation(&self, result: &AdjustmentResult, duration: Duration) {
        let outcome = if result.player_wins { "win" } else { "loss" };

        self.calculation_metrics
            .calculations_total
            .with_label_values(&[outcome])
            .inc();

        if result.score_fallback {
            self.calculation_metrics
                .fallbacks_total
                .with_label_values(&["score"])
                .inc();
        }

        if !result.unrecognized_experience.is_empty() {
            self.calculation_metrics
                .fallbacks_total
                .with_label_values(&["experience"])
                .inc_by(result.unrecognized_experience.len() as u64);
        }

        self.calculation_metrics
            .calculation_duration
            .observe(duration.as_secs_f64());

        if result.adjustment.is_finite() {
            self.calculation_metrics
                .adjustment_magnitude
                .observe(result.adjustment);
        }
    }

    /// Record a request that was answered with an error body
    pub fn record_request_error(&self, reason: &str) {
        self.request_metrics
            .request_errors_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.request_metrics.health_status.set(status as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl CalculationMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let calculations_total = IntCounterVec::new(
            Opts::new(
                "rally_pti_calculations_total",
                "Total PTI calculations by player team outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(calculations_total.clone()))?;

        let fallbacks_total = IntCounterVec::new(
            Opts::new(
                "rally_pti_fallbacks_total",
                "Inputs that fell back to a default value",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(fallbacks_total.clone()))?;

        let calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "rally_pti_calculation_duration_seconds",
                "Time spent computing a PTI adjustment",
            )
            .buckets(vec![0.000001, 0.000005, 0.00001, 0.00005, 0.0001, 0.001]),
        )?;
        registry.register(Box::new(calculation_duration.clone()))?;

        let adjustment_magnitude = Histogram::with_opts(
            HistogramOpts::new(
                "rally_pti_adjustment_magnitude",
                "Size of the rating adjustment applied to each player",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.5]),
        )?;
        registry.register(Box::new(adjustment_magnitude.clone()))?;

        Ok(Self {
            calculations_total,
            fallbacks_total,
            calculation_duration,
            adjustment_magnitude,
        })
    }
}

impl RequestMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let request_errors_total = IntCounterVec::new(
            Opts::new(
                "rally_pti_request_errors_total",
                "Calculation requests answered with an error",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(request_errors_total.clone()))?;

        let health_status = IntGauge::new(
            "rally_pti_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            request_errors_total,
            health_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::compute_adjustment;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        let _calculation = collector.calculation();
        let _request = collector.request();
    }

    #[test]
    fn test_calculation_recording() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        let win = compute_adjustment(50.0, 40.0, 30.0, 20.0, "30+", "30+", "30+", "30+", "6-4");
        let fallback = compute_adjustment(50.0, 40.0, 30.0, 20.0, "??", "30+", "30+", "??", "");

        collector.record_calculation(&win, Duration::from_micros(3));
        collector.record_calculation(&fallback, Duration::from_micros(3));

        let calc = collector.calculation();
        assert_eq!(calc.calculations_total.with_label_values(&["win"]).get(), 2);
        assert_eq!(calc.calculations_total.with_label_values(&["loss"]).get(), 0);
        assert_eq!(calc.fallbacks_total.with_label_values(&["score"]).get(), 1);
        assert_eq!(
            calc.fallbacks_total.with_label_values(&["experience"]).get(),
            2
        );
        assert_eq!(calc.calculation_duration.get_sample_count(), 2);
    }

    #[test]
    fn test_request_errors_and_health() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_request_error("bad_request");
        collector.record_request_error("bad_request");
        collector.update_health_status(2);

        assert_eq!(
            collector
                .request()
                .request_errors_total
                .with_label_values(&["bad_request"])
                .get(),
            2
        );
        assert_eq!(collector.request().health_status.get(), 2);
    }

    #[test]
    fn test_metrics_timer() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        let timer = collector.start_timer();

        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.elapsed();

        assert!(duration >= Duration::from_millis(10));

        let final_duration = timer.stop();
        assert!(final_duration >= Duration::from_millis(10));
    }
}
