//! Well-known species identifiers and species-id validation.
//!
//! A species id names one threshold profile (one egg type). Any non-empty
//! id of at most [`MAX_SPECIES_ID_LEN`] characters is accepted.

use crate::error::CoreError;

/// Chicken egg profile.
pub const CHICKEN_EGG: &str = "Chicken Egg";

/// Duck egg profile.
pub const DUCK_EGG: &str = "Duck Egg";

/// Species used when the caller does not select one.
pub const DEFAULT_SPECIES: &str = CHICKEN_EGG;

/// Maximum length of a species id, in characters.
pub const MAX_SPECIES_ID_LEN: usize = 50;

/// Validate a caller-supplied species id.
///
/// Rejects blank ids and ids longer than [`MAX_SPECIES_ID_LEN`] characters.
pub fn validate_species_id(species_id: &str) -> Result<(), CoreError> {
    if species_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "species_id must not be empty".to_string(),
        ));
    }
    let len = species_id.chars().count();
    if len > MAX_SPECIES_ID_LEN {
        return Err(CoreError::Validation(format!(
            "species_id must be at most {MAX_SPECIES_ID_LEN} characters, got {len}"
        )));
    }
    Ok(())
}
