//! HTTP API for the Rescisão Engine.
//!
//! This module exposes a minimal REST API around the severance engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! submit one or many calculation inputs and receive the itemised
//! results in JSON.  Dates are checked against the server's [`Clock`]
//! before the engine runs, since the engine itself never looks at the
//! current date.

use crate::config::ServerConfig;
use crate::engine::{compute, compute_batch};
use crate::error::InvalidInputError;
use crate::models::{CalculationInput, CalculationResult};
use crate::rules::{EntitlementProfile, PROFILES};
use crate::validation::{validate_period, Clock, SystemClock};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub config: ServerConfig,
}

/// Body of `POST /api/rescisao/lote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub requests: Vec<CalculationInput>,
}

/// One slot of a batch response, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Ok { result: CalculationResult },
    Rejected { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchOutcome>,
}

/// Errors surfaced by the handlers.
#[derive(Debug)]
pub enum ApiError {
    Invalid(InvalidInputError),
    /// The body could not be read as the expected JSON.
    Malformed { status: StatusCode, message: String },
    BatchTooLarge { size: usize, max: usize },
    Internal(String),
}

impl From<InvalidInputError> for ApiError {
    fn from(err: InvalidInputError) -> Self {
        ApiError::Invalid(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Invalid(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Malformed { status, message } => (status, message),
            ApiError::BatchTooLarge { size, max } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("batch of {size} requests exceeds the limit of {max}"),
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        warn!(status = status.as_u16(), error = %message, "request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the API router around the given configuration and clock.
/// Returns the router and a handle to the state.
pub fn build_router(config: ServerConfig, clock: Arc<dyn Clock>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { clock, config });
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/regras", get(rules_handler))
        .route("/api/rescisao", post(calculate_handler))
        .route("/api/rescisao/lote", post(batch_handler))
        .with_state(state.clone());
    (router, state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /api/regras
async fn rules_handler() -> Json<Vec<EntitlementProfile>> {
    Json(PROFILES.to_vec())
}

/// Handler for POST /api/rescisao
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CalculationInput>, JsonRejection>,
) -> Result<Json<CalculationResult>, ApiError> {
    let Json(input) = payload?;
    validate_period(&input.period, app_state.clock.as_ref())?;
    let reason = input.reason;
    let result = compute(input)?;
    info!(%reason, total = %result.total, "severance calculated");
    Ok(Json(result))
}

/// Handler for POST /api/rescisao/lote
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(request) = payload?;
    let size = request.requests.len();
    let max = app_state.config.max_batch;
    if size > max {
        return Err(ApiError::BatchTooLarge { size, max });
    }

    let clock = app_state.clock.clone();
    // The rayon fan-out blocks, so keep it off the async workers.
    let results = tokio::task::spawn_blocking(move || {
        let inputs = request.requests;
        let date_checks: Vec<_> = inputs
            .iter()
            .map(|input| validate_period(&input.period, clock.as_ref()))
            .collect();
        date_checks
            .into_iter()
            .zip(compute_batch(inputs))
            .map(|(checked, computed)| match checked.and(computed) {
                Ok(result) => BatchOutcome::Ok { result },
                Err(err) => BatchOutcome::Rejected {
                    error: err.to_string(),
                },
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))?;

    let rejected = results
        .iter()
        .filter(|r| matches!(r, BatchOutcome::Rejected { .. }))
        .count();
    info!(size, rejected, "batch calculated");
    Ok(Json(BatchResponse { results }))
}

/// Launch the API server.  This function builds the router from the
/// given configuration and binds to its address.  It blocks until the
/// server terminates (e.g. when interrupted).
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.bind_addr.clone();
    let (router, _state) = build_router(config, Arc::new(SystemClock));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
