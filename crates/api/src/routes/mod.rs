pub mod health;
pub mod monitor;
pub mod readings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /monitor                 run one monitoring cycle (GET, POST)
/// /thresholds              species threshold profiles
/// /history                 recent history window
/// /readings                sensor feed ingestion
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(monitor::router())
        .merge(readings::router())
}
