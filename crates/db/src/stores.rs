//! PostgreSQL-backed implementations of the monitoring ports.
//!
//! Each store owns a clone of the pool handed to it at construction. Any
//! `sqlx::Error` is reported to the engine as [`CoreError::Infrastructure`].

use async_trait::async_trait;
use eggwatch_core::error::CoreError;
use eggwatch_core::ports::{HistoryRecorder, ReadingSource, ThresholdRegistry};
use eggwatch_core::readings::{HistoryEntry, NewHistoryEntry, Reading};
use eggwatch_core::thresholds::{ThresholdProfile, ThresholdUpdate};

use crate::repositories::{HistoryEntryRepo, SensorReadingRepo, ThresholdProfileRepo};
use crate::DbPool;

/// Convert a database error into the engine's infrastructure failure.
fn infrastructure(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Infrastructure(err.to_string())
}

/// Threshold registry over `threshold_profiles`.
#[derive(Clone)]
pub struct PgThresholdRegistry {
    pool: DbPool,
}

impl PgThresholdRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThresholdRegistry for PgThresholdRegistry {
    async fn get_or_create(&self, species_id: &str) -> Result<ThresholdProfile, CoreError> {
        ThresholdProfileRepo::get_or_create(&self.pool, species_id)
            .await
            .map(ThresholdProfile::from)
            .map_err(infrastructure)
    }

    async fn update(&self, species_id: &str, update: &ThresholdUpdate) -> Result<(), CoreError> {
        let updated = ThresholdProfileRepo::update_bounds(&self.pool, species_id, update)
            .await
            .map_err(infrastructure)?;
        match updated {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound {
                entity: "threshold_profile",
                key: species_id.to_string(),
            }),
        }
    }

    async fn list(&self) -> Result<Vec<ThresholdProfile>, CoreError> {
        let rows = ThresholdProfileRepo::list_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(rows.into_iter().map(ThresholdProfile::from).collect())
    }
}

/// History recorder over `history_entries`.
#[derive(Clone)]
pub struct PgHistoryRecorder {
    pool: DbPool,
}

impl PgHistoryRecorder {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRecorder for PgHistoryRecorder {
    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, CoreError> {
        HistoryEntryRepo::insert(&self.pool, entry)
            .await
            .map(HistoryEntry::from)
            .map_err(infrastructure)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, CoreError> {
        let rows = HistoryEntryRepo::list_recent(&self.pool, limit)
            .await
            .map_err(infrastructure)?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}

/// Reading source over the `sensor_readings` feed table.
#[derive(Clone)]
pub struct PgReadingSource {
    pool: DbPool,
}

impl PgReadingSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingSource for PgReadingSource {
    async fn latest(&self) -> Result<Option<Reading>, CoreError> {
        SensorReadingRepo::find_latest(&self.pool)
            .await
            .map(|row| row.map(Reading::from))
            .map_err(infrastructure)
    }
}
