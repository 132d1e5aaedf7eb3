//! Status evaluator: classifies a reading against a threshold profile.
//!
//! Pure logic, no I/O. Temperature and humidity are classified
//! independently; there is no coupling between the two.

use serde::{Deserialize, Serialize};

use crate::readings::Reading;
use crate::thresholds::ThresholdBounds;

/// Where a value sits relative to its configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClassification {
    /// Value missing or non-numeric, or the range is not configured.
    Unknown,
    BelowRange,
    AboveRange,
    OptimalRange,
}

impl StatusClassification {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::BelowRange => "Below range",
            Self::AboveRange => "Above range",
            Self::OptimalRange => "Optimal range",
        }
    }
}

impl std::fmt::Display for StatusClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `value` against the inclusive range `[min, max]`.
///
/// Returns `Unknown` when the value is absent or NaN, or when either bound is
/// absent. With an inverted range (`min > max`) no value is optimal.
pub fn classify(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> StatusClassification {
    let (Some(value), Some(min), Some(max)) = (value, min, max) else {
        return StatusClassification::Unknown;
    };
    if value.is_nan() {
        return StatusClassification::Unknown;
    }

    if value < min {
        StatusClassification::BelowRange
    } else if value > max {
        StatusClassification::AboveRange
    } else {
        StatusClassification::OptimalRange
    }
}

/// Classification of both measured quantities of one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStatus {
    pub temperature: StatusClassification,
    pub humidity: StatusClassification,
}

impl ReadingStatus {
    /// Both quantities unknown (no reading available).
    pub const UNKNOWN: Self = Self {
        temperature: StatusClassification::Unknown,
        humidity: StatusClassification::Unknown,
    };
}

/// Classify a reading (or its absence) against a profile's bounds.
pub fn classify_reading(reading: Option<&Reading>, bounds: &ThresholdBounds) -> ReadingStatus {
    let Some(reading) = reading else {
        return ReadingStatus::UNKNOWN;
    };
    ReadingStatus {
        temperature: classify(reading.temperature, bounds.temp_min, bounds.temp_max),
        humidity: classify(reading.humidity, bounds.humid_min, bounds.humid_max),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
