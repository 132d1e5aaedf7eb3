//! Repository for the `threshold_profiles` table.

use eggwatch_core::thresholds::ThresholdUpdate;
use sqlx::PgPool;

use crate::models::threshold::ThresholdProfileRow;

/// Column list for `threshold_profiles` queries.
const COLUMNS: &str = "\
    id, species_id, temp_min, temp_max, humid_min, humid_max, \
    created_at, updated_at";

/// Provides query operations for threshold profiles.
pub struct ThresholdProfileRepo;

impl ThresholdProfileRepo {
    /// Find the profile for a species.
    pub async fn find_by_species(
        pool: &PgPool,
        species_id: &str,
    ) -> Result<Option<ThresholdProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threshold_profiles WHERE species_id = $1");
        sqlx::query_as::<_, ThresholdProfileRow>(&query)
            .bind(species_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an unconfigured profile unless one already exists.
    ///
    /// Returns `None` when the unique constraint on `species_id` swallowed the
    /// insert because another writer got there first.
    pub async fn insert_if_absent(
        pool: &PgPool,
        species_id: &str,
    ) -> Result<Option<ThresholdProfileRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO threshold_profiles (species_id) VALUES ($1) \
             ON CONFLICT (species_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThresholdProfileRow>(&query)
            .bind(species_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the profile for a species, creating an unconfigured one if needed.
    ///
    /// Safe under concurrent first-time creation: a lost insert race is
    /// resolved by re-fetching the winner's row.
    pub async fn get_or_create(
        pool: &PgPool,
        species_id: &str,
    ) -> Result<ThresholdProfileRow, sqlx::Error> {
        if let Some(existing) = Self::find_by_species(pool, species_id).await? {
            return Ok(existing);
        }

        if let Some(created) = Self::insert_if_absent(pool, species_id).await? {
            tracing::info!(species = %species_id, "Registered new threshold profile");
            return Ok(created);
        }

        tracing::debug!(species = %species_id, "Threshold profile created concurrently, re-fetching");
        Self::find_by_species(pool, species_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Overwrite all four bounds of an existing profile.
    ///
    /// Returns `None` if the species was never registered.
    pub async fn update_bounds(
        pool: &PgPool,
        species_id: &str,
        update: &ThresholdUpdate,
    ) -> Result<Option<ThresholdProfileRow>, sqlx::Error> {
        let query = format!(
            "UPDATE threshold_profiles SET \
                temp_min = $2, \
                temp_max = $3, \
                humid_min = $4, \
                humid_max = $5, \
                updated_at = NOW() \
             WHERE species_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThresholdProfileRow>(&query)
            .bind(species_id)
            .bind(update.temp_min)
            .bind(update.temp_max)
            .bind(update.humid_min)
            .bind(update.humid_max)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles ordered by species id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ThresholdProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threshold_profiles ORDER BY species_id");
        sqlx::query_as::<_, ThresholdProfileRow>(&query)
            .fetch_all(pool)
            .await
    }
}
