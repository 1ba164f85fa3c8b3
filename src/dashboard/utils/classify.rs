//! Status classification for individual readings.
//!
//! Two threshold policies: particulates (PM2.5, PM10) and simple gases
//! (NO2, SO2, CO, O3). Temperature and humidity are shown raw.

use serde::Serialize;

use crate::dashboard::readings::ReadingField;

// ============================================================================
// Thresholds
// ============================================================================

/// Upper bound (inclusive) for a Good particulate reading.
pub const PARTICULATE_GOOD_MAX: f64 = 12.0;
/// Upper bound (inclusive) for a Moderate particulate reading.
pub const PARTICULATE_MODERATE_MAX: f64 = 35.4;

pub const GAS_GOOD_MAX: f64 = 20.0;
pub const GAS_MODERATE_MAX: f64 = 50.0;

/// Qualitative status badge for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum StatusTier {
    /// No reading (exact zero on a gas). Rendered as a dash.
    #[default]
    #[serde(rename = "None")]
    NoReading,
    Good,
    Moderate,
    Poor,
}

impl StatusTier {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::NoReading => "—",
            StatusTier::Good => "Good",
            StatusTier::Moderate => "Moderate",
            StatusTier::Poor => "Poor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTier::NoReading => "status-none",
            StatusTier::Good => "status-good",
            StatusTier::Moderate => "status-moderate",
            StatusTier::Poor => "status-poor",
        }
    }
}

/// Threshold policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassifyPolicy {
    Particulate,
    SimpleGas,
}

/// How a canonical reading is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    Tiered(ClassifyPolicy),
    /// Raw value with a unit suffix, neutral style.
    Ambient { unit: &'static str },
}

/// Neutral style for ambient readings.
pub const AMBIENT_CSS_CLASS: &str = "status-neutral";

pub fn reading_kind(field: ReadingField) -> ReadingKind {
    match field {
        // PM10 reuses the PM2.5 thresholds; its real-world scale differs.
        ReadingField::Pm25 | ReadingField::Pm10 => ReadingKind::Tiered(ClassifyPolicy::Particulate),
        ReadingField::No2 | ReadingField::So2 | ReadingField::Co | ReadingField::O3 => {
            ReadingKind::Tiered(ClassifyPolicy::SimpleGas)
        }
        ReadingField::Temperature => ReadingKind::Ambient { unit: "°C" },
        ReadingField::Humidity => ReadingKind::Ambient { unit: "%" },
    }
}

/// Classify a reading under the given policy.
pub fn classify(value: f64, policy: ClassifyPolicy) -> StatusTier {
    match policy {
        ClassifyPolicy::Particulate => classify_particulate(value),
        ClassifyPolicy::SimpleGas => classify_gas(value),
    }
}

/// Particulate policy:
/// - <= 12: Good
/// - <= 35.4: Moderate
/// - above: Poor
fn classify_particulate(value: f64) -> StatusTier {
    if value <= PARTICULATE_GOOD_MAX {
        StatusTier::Good
    } else if value <= PARTICULATE_MODERATE_MAX {
        StatusTier::Moderate
    } else {
        StatusTier::Poor
    }
}

/// Simple-gas policy:
/// - == 0: no reading
/// - <= 20: Good
/// - <= 50: Moderate
/// - above: Poor
fn classify_gas(value: f64) -> StatusTier {
    if value == 0.0 {
        StatusTier::NoReading
    } else if value <= GAS_GOOD_MAX {
        StatusTier::Good
    } else if value <= GAS_MODERATE_MAX {
        StatusTier::Moderate
    } else {
        StatusTier::Poor
    }
}
