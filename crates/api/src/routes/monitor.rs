//! Route definitions for the monitoring engine.

use axum::routing::get;
use axum::Router;

use crate::handlers::{history, monitor, thresholds};
use crate::state::AppState;

/// Routes mounted at the `/api/v1` root.
///
/// ```text
/// GET  /monitor            -> get_monitor      (anonymous allowed)
/// POST /monitor            -> run_monitor      (threshold writes need a token)
/// GET  /thresholds         -> list_thresholds
/// GET  /history            -> list_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/monitor",
            get(monitor::get_monitor).post(monitor::run_monitor),
        )
        .route("/thresholds", get(thresholds::list_thresholds))
        .route("/history", get(history::list_history))
}
