//! Raw sensor feed rows.

use eggwatch_core::readings::Reading;
use eggwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `sensor_readings`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorReadingRow {
    pub id: DbId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<SensorReadingRow> for Reading {
    fn from(row: SensorReadingRow) -> Self {
        Self {
            temperature: row.temperature,
            humidity: row.humidity,
            observed_at: row.observed_at,
        }
    }
}

/// DTO for inserting a reading pushed by the sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensorReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Timestamp,
}
