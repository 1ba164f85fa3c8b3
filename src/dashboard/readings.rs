//! Reading normalization.
//!
//! Upstream records name the same quantity in several ways (`pm25`,
//! `pm2_5`, `"PM2.5"`) and encode numbers either as JSON numbers or as text.
//! `normalize` resolves each canonical field through an ordered alias table
//! and always returns a complete `CanonicalReadings`.

use serde::Serialize;

use super::types::{value_as_f64, RawInputRecord};

/// The eight canonical readings, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    Pm25,
    Pm10,
    No2,
    So2,
    Co,
    O3,
    Temperature,
    Humidity,
}

impl ReadingField {
    pub const ALL: [ReadingField; 8] = [
        ReadingField::Pm25,
        ReadingField::Pm10,
        ReadingField::No2,
        ReadingField::So2,
        ReadingField::Co,
        ReadingField::O3,
        ReadingField::Temperature,
        ReadingField::Humidity,
    ];

    /// Display name used on cards.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingField::Pm25 => "PM2.5",
            ReadingField::Pm10 => "PM10",
            ReadingField::No2 => "NO2",
            ReadingField::So2 => "SO2",
            ReadingField::Co => "CO",
            ReadingField::O3 => "O3",
            ReadingField::Temperature => "Temperature",
            ReadingField::Humidity => "Humidity",
        }
    }

    /// Short label used on the chart axis.
    pub fn chart_label(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "Temp",
            other => other.label(),
        }
    }

    /// Key used by the prediction service for this field.
    pub fn service_key(&self) -> &'static str {
        READING_ALIASES[self.index()].1[0]
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Accepted keys per canonical field, highest priority first.
pub const READING_ALIASES: [(ReadingField, &[&str]); 8] = [
    (ReadingField::Pm25, &["pm25", "pm2_5", "PM2.5", "pm2.5", "PM25"]),
    (ReadingField::Pm10, &["pm10", "PM10"]),
    (ReadingField::No2, &["no2", "NO2"]),
    (ReadingField::So2, &["so2", "SO2"]),
    (ReadingField::Co, &["co", "CO"]),
    (ReadingField::O3, &["o3", "O3"]),
    (ReadingField::Temperature, &["temperature", "temp", "Temperature", "TEMP"]),
    (ReadingField::Humidity, &["humidity", "Humidity", "rh", "RH"]),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CanonicalReadings {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl CanonicalReadings {
    pub fn get(&self, field: ReadingField) -> f64 {
        match field {
            ReadingField::Pm25 => self.pm25,
            ReadingField::Pm10 => self.pm10,
            ReadingField::No2 => self.no2,
            ReadingField::So2 => self.so2,
            ReadingField::Co => self.co,
            ReadingField::O3 => self.o3,
            ReadingField::Temperature => self.temperature,
            ReadingField::Humidity => self.humidity,
        }
    }

    fn set(&mut self, field: ReadingField, value: f64) {
        let slot = match field {
            ReadingField::Pm25 => &mut self.pm25,
            ReadingField::Pm10 => &mut self.pm10,
            ReadingField::No2 => &mut self.no2,
            ReadingField::So2 => &mut self.so2,
            ReadingField::Co => &mut self.co,
            ReadingField::O3 => &mut self.o3,
            ReadingField::Temperature => &mut self.temperature,
            ReadingField::Humidity => &mut self.humidity,
        };
        *slot = value;
    }

    /// Values in chart order: PM2.5, PM10, NO2, SO2, CO, O3, Temp, Humidity.
    pub fn as_chart_values(&self) -> [f64; 8] {
        ReadingField::ALL.map(|f| self.get(f))
    }
}

/// First alias that is present and parses to a finite number.
pub fn resolve_alias(raw: &RawInputRecord, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|key| raw.get(*key).and_then(value_as_f64))
}

/// Normalize a raw record into the canonical reading set. Never fails;
/// unresolved fields are 0.
pub fn normalize(raw: &RawInputRecord) -> CanonicalReadings {
    let mut readings = CanonicalReadings::default();

    for (field, aliases) in READING_ALIASES.iter() {
        match resolve_alias(raw, aliases) {
            Some(v) => readings.set(*field, v),
            None => tracing::debug!("No usable value for {}, defaulting to 0", field.label()),
        }
    }

    readings
}
