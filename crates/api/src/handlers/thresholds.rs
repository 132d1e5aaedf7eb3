//! Handlers for threshold profiles.

use axum::extract::State;
use axum::Json;
use eggwatch_core::thresholds::ThresholdProfile;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /thresholds
///
/// List every registered species profile, ordered by species id.
pub async fn list_thresholds(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ThresholdProfile>>>> {
    let profiles = state.monitor.profiles().await?;
    Ok(Json(DataResponse { data: profiles }))
}
