//! Handlers for the history window.

use axum::extract::{Query, State};
use axum::Json;
use eggwatch_core::readings::HistoryEntry;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest window a caller may request.
const MAX_HISTORY_LIMIT: i64 = 100;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of entries (default: the configured window).
    pub limit: Option<i64>,
}

/// GET /history
///
/// The most recent history entries, newest first. Read-only: does not run a
/// cycle or append anything.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let limit = query
        .limit
        .unwrap_or(state.monitor.config().history_window);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}"
        )));
    }

    let entries = state.monitor.history(limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
