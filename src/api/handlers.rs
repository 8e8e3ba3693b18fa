//! HTTP handlers for the PTI service

use crate::api::error::ApiError;
use crate::api::messages::{CalculatePtiRequest, CalculatePtiResponse};
use crate::api::server::ApiState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use tracing::{debug, error, info, warn};

/// POST /api/calculate-pti
///
/// Rate one doubles match. Malformed bodies get a 400, and results that
/// cannot be represented in JSON (NaN/Infinity) get a 422.
pub async fn calculate_pti_handler(
    State(state): State<ApiState>,
    payload: Result<Json<CalculatePtiRequest>, JsonRejection>,
) -> Result<Json<CalculatePtiResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected PTI request: {}", rejection.body_text());
        let err = ApiError::BadRequest(rejection.body_text());
        state.metrics.record_request_error(err.reason());
        err
    })?;

    let input = request.to_match_input();

    let timer = state.metrics.start_timer();
    let result = state.calculator.compute_adjustment(&input);
    let duration = timer.stop();

    if let Err(e) = result.ensure_finite() {
        warn!(
            "PTI calculation produced a non-finite value - ratings: {} / {} vs {} / {}: {}",
            request.player_pti, request.partner_pti, request.opp1_pti, request.opp2_pti, e
        );
        let err = ApiError::from(e);
        state.metrics.record_request_error(err.reason());
        return Err(err);
    }

    state.metrics.record_calculation(&result, duration);

    info!(
        "PTI calculated - score: '{}', player wins: {}, adjustment: {:.6}, time: {:.3}ms",
        request.match_score,
        result.player_wins,
        result.adjustment,
        duration.as_secs_f64() * 1000.0
    );

    Ok(Json(CalculatePtiResponse::from_result(&result)))
}

/// Root endpoint handler - shows service information
pub async fn root_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "calculator": state.calculator.config(),
        "endpoints": [
            "/api/calculate-pti",
            "/health",
            "/ready",
            "/metrics"
        ]
    }))
}

/// Lightweight health check endpoint handler
pub async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    debug!("Health check requested");

    state.metrics.update_health_status(2);

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": state.service_name,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now()
        })),
    )
}

/// Readiness check endpoint handler
pub async fn ready_handler() -> impl IntoResponse {
    debug!("Readiness check requested");

    // The calculator is built before the router exists, so serving means ready
    (StatusCode::OK, "Ready")
}

/// Prometheus metrics endpoint handler
pub async fn metrics_handler(State(state): State<ApiState>) -> Result<Response, ApiError> {
    debug!("Metrics endpoint requested");

    let registry = state.metrics.registry();
    let metric_families = registry.gather();
    let encoder = TextEncoder::new();

    let metrics_output = encoder.encode_to_string(&metric_families).map_err(|e| {
        error!("Failed to encode metrics: {}", e);
        ApiError::Internal(format!("Failed to encode metrics: {}", e))
    })?;

    debug!("Serving {} metric families", metric_families.len());

    Ok((
        StatusCode::OK,
        [("content-type", encoder.format_type().to_string())],
        metrics_output,
    )
        .into_response())
}
