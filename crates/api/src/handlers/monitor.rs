//! Handlers for the monitoring cycle.
//!
//! Every call runs exactly one cycle: it may register the species, may write
//! thresholds (POST only, authorized callers only), appends the latest
//! reading to history, and returns the resulting view.

use axum::extract::{Query, State};
use axum::Json;
use eggwatch_core::monitoring::{CycleRequest, MonitorView};
use eggwatch_core::thresholds::ThresholdUpdate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /monitor`.
#[derive(Debug, Deserialize)]
pub struct MonitorQuery {
    /// Species to evaluate (default: the configured default species).
    pub species: Option<String>,
}

/// Request body for `POST /monitor`.
#[derive(Debug, Deserialize)]
pub struct RunCycleRequest {
    pub species: Option<String>,
    /// New bounds to write before evaluation. All four are required.
    pub thresholds: Option<ThresholdUpdate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /monitor
///
/// Run one cycle for the selected species without touching its thresholds.
pub async fn get_monitor(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<MonitorQuery>,
) -> AppResult<Json<DataResponse<MonitorView>>> {
    let view = state
        .monitor
        .run(CycleRequest {
            species_id: query.species,
            update: None,
            authorized: caller.is_authorized(),
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /monitor
///
/// Run one cycle, optionally writing new thresholds first. The written
/// bounds are reflected in the returned view.
pub async fn run_monitor(
    State(state): State<AppState>,
    caller: Caller,
    Json(input): Json<RunCycleRequest>,
) -> AppResult<Json<DataResponse<MonitorView>>> {
    if input.thresholds.is_some() {
        tracing::info!(
            user_id = caller.user.as_ref().map(|u| u.user_id),
            species = input.species.as_deref().unwrap_or("<default>"),
            "Threshold update requested"
        );
    }

    let view = state
        .monitor
        .run(CycleRequest {
            species_id: input.species,
            update: input.thresholds,
            authorized: caller.is_authorized(),
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}
