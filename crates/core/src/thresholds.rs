//! Per-species threshold profiles.
//!
//! A profile holds four optional bounds. A freshly created profile has all
//! four absent, which makes every classification against it `Unknown`.
//! Bound ordering is deliberately not checked: `temp_min > temp_max` is
//! stored as given.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Acceptable temperature and humidity ranges. `None` means "not configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humid_min: Option<f64>,
    pub humid_max: Option<f64>,
}

impl ThresholdBounds {
    /// True when all four bounds are present.
    pub fn is_configured(&self) -> bool {
        self.temp_min.is_some()
            && self.temp_max.is_some()
            && self.humid_min.is_some()
            && self.humid_max.is_some()
    }
}

/// The named threshold configuration for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    pub species_id: String,
    #[serde(flatten)]
    pub bounds: ThresholdBounds,
}

impl ThresholdProfile {
    /// A newly registered profile with every bound absent.
    pub fn unconfigured(species_id: impl Into<String>) -> Self {
        Self {
            species_id: species_id.into(),
            bounds: ThresholdBounds::default(),
        }
    }
}

/// Replacement values for all four bounds of a profile.
///
/// Updates are all-or-nothing: there is no partial-field update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humid_min: f64,
    pub humid_max: f64,
}

impl ThresholdUpdate {
    /// Reject NaN and infinite bounds. Ordering between min and max is not checked.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("temp_min", self.temp_min),
            ("temp_max", self.temp_max),
            ("humid_min", self.humid_min),
            ("humid_max", self.humid_max),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::Validation(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl From<ThresholdUpdate> for ThresholdBounds {
    fn from(update: ThresholdUpdate) -> Self {
        Self {
            temp_min: Some(update.temp_min),
            temp_max: Some(update.temp_max),
            humid_min: Some(update.humid_min),
            humid_max: Some(update.humid_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(temp_min: f64, temp_max: f64) -> ThresholdUpdate {
        ThresholdUpdate {
            temp_min,
            temp_max,
            humid_min: 50.0,
            humid_max: 65.0,
        }
    }

    #[test]
    fn unconfigured_profile_has_no_bounds() {
        let profile = ThresholdProfile::unconfigured("Chicken Egg");
        assert_eq!(profile.species_id, "Chicken Egg");
        assert_eq!(profile.bounds, ThresholdBounds::default());
        assert!(!profile.bounds.is_configured());
    }

    #[test]
    fn update_fills_every_bound() {
        let bounds = ThresholdBounds::from(update(36.0, 38.0));
        assert!(bounds.is_configured());
        assert_eq!(bounds.temp_min, Some(36.0));
        assert_eq!(bounds.humid_max, Some(65.0));
    }

    #[test]
    fn inverted_range_is_accepted() {
        assert!(update(39.0, 36.0).validate().is_ok());
    }

    #[test]
    fn non_finite_bound_is_rejected() {
        assert!(update(f64::NAN, 38.0).validate().is_err());
        assert!(update(36.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn profile_serializes_flat() {
        let profile = ThresholdProfile {
            species_id: "Duck Egg".to_string(),
            bounds: update(37.0, 38.0).into(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["species_id"], "Duck Egg");
        assert_eq!(json["temp_min"], 37.0);
        assert_eq!(json["humid_min"], 50.0);
    }
}
