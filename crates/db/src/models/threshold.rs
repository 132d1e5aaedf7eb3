//! Threshold profile rows.

use eggwatch_core::thresholds::{ThresholdBounds, ThresholdProfile};
use eggwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row of `threshold_profiles`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ThresholdProfileRow {
    pub id: DbId,
    pub species_id: String,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humid_min: Option<f64>,
    pub humid_max: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ThresholdProfileRow> for ThresholdProfile {
    fn from(row: ThresholdProfileRow) -> Self {
        Self {
            species_id: row.species_id,
            bounds: ThresholdBounds {
                temp_min: row.temp_min,
                temp_max: row.temp_max,
                humid_min: row.humid_min,
                humid_max: row.humid_max,
            },
        }
    }
}
