//! HTTP interface for the PTI calculator
//!
//! This module exposes `POST /api/calculate-pti` together with the health,
//! readiness and Prometheus endpoints used by operations.

pub mod error;
pub mod handlers;
pub mod messages;
pub mod server;

pub use error::ApiError;
pub use messages::{CalculatePtiRequest, CalculatePtiResponse, ErrorResponse, ExperienceInput};
pub use server::{ApiServer, ApiServerConfig, ApiState};
