//! Route definitions for sensor feed ingestion.

use axum::routing::post;
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// ```text
/// POST /readings           -> ingest_reading   (requires token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/readings", post(readings::ingest_reading))
}
