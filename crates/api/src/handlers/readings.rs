//! Sensor feed ingestion.
//!
//! The incubator sensor pushes its samples here; the monitoring cycle later
//! picks the newest one up as "the latest reading".

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use eggwatch_core::types::Timestamp;
use eggwatch_db::models::sensor_reading::{CreateSensorReading, SensorReadingRow};
use eggwatch_db::repositories::SensorReadingRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for pushing one sensor sample.
#[derive(Debug, Deserialize)]
pub struct IngestReadingRequest {
    /// `null` when the sensor produced a non-numeric sample.
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Sensor-side timestamp (default: time of receipt).
    pub observed_at: Option<Timestamp>,
}

/// POST /readings
///
/// Store one sample in the sensor feed. Requires a valid bearer token.
pub async fn ingest_reading(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<IngestReadingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SensorReadingRow>>)> {
    let dto = CreateSensorReading {
        temperature: input.temperature,
        humidity: input.humidity,
        observed_at: input.observed_at.unwrap_or_else(Utc::now),
    };

    let row = SensorReadingRepo::insert(&state.pool, &dto).await?;
    tracing::debug!(
        reading_id = row.id,
        user_id = user.user_id,
        temperature = ?row.temperature,
        humidity = ?row.humidity,
        "Sensor reading stored"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}
