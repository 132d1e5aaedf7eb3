//! Repository for the `sensor_readings` table (raw sensor feed).

use sqlx::PgPool;

use crate::models::sensor_reading::{CreateSensorReading, SensorReadingRow};

/// Column list for `sensor_readings` SELECT queries.
const COLUMNS: &str = "id, temperature, humidity, observed_at, created_at";

/// Provides query operations for the sensor feed.
pub struct SensorReadingRepo;

impl SensorReadingRepo {
    /// Insert one reading pushed by the sensor.
    pub async fn insert(
        pool: &PgPool,
        reading: &CreateSensorReading,
    ) -> Result<SensorReadingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_readings (temperature, humidity, observed_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReadingRow>(&query)
            .bind(reading.temperature)
            .bind(reading.humidity)
            .bind(reading.observed_at)
            .fetch_one(pool)
            .await
    }

    /// The reading with the newest `observed_at`, if any.
    pub async fn find_latest(pool: &PgPool) -> Result<Option<SensorReadingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             ORDER BY observed_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, SensorReadingRow>(&query)
            .fetch_optional(pool)
            .await
    }
}
