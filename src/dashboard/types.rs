//! Shared types and value helpers for the dashboard pipeline.
//!
//! Prediction responses arrive as loosely typed JSON. The helpers here pull
//! strings and numbers out of a `serde_json::Map` without failing on
//! unexpected shapes.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DashboardError, Result};

/// Untyped input record as produced by the transport layer.
pub type RawInputRecord = Map<String, Value>;

/// Placeholder shown wherever a value is absent.
pub const PLACEHOLDER: &str = "—";

// ============================================================================
// Value Helpers
// ============================================================================

/// Extract a string value from a JSON object.
pub fn get_str<'a>(data: &'a RawInputRecord, key: &str) -> Option<&'a str> {
    data.get(key).and_then(|v| v.as_str())
}

/// Coerce a JSON value to a finite f64.
/// Handles both numeric JSON values and string-encoded numbers.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|v| v.is_finite())
}

/// Extract a finite f64 value from a JSON object.
pub fn get_f64(data: &RawInputRecord, key: &str) -> Option<f64> {
    data.get(key).and_then(value_as_f64)
}

/// Format an optional f64 value with specified decimal places.
pub fn fmt_f64(val: Option<f64>, decimals: usize) -> String {
    match val {
        Some(v) => format!("{:.prec$}", v, prec = decimals),
        None => PLACEHOLDER.to_string(),
    }
}

// ============================================================================
// Prediction Response
// ============================================================================

/// Class probabilities as reported by the model. Not renormalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub low: Option<f64>,
    pub moderate: Option<f64>,
    pub high: Option<f64>,
}

impl ClassProbabilities {
    /// Largest probability, missing classes counting as zero.
    pub fn max(&self) -> f64 {
        [self.low, self.moderate, self.high]
            .into_iter()
            .map(|p| p.unwrap_or(0.0))
            .fold(0.0, f64::max)
    }
}

/// One prediction as returned by the prediction service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionResponse {
    pub city: Option<String>,
    pub aqi: Option<f64>,
    pub aqi_category: Option<String>,
    pub main_pollutant: Option<String>,
    /// Risk label, e.g. "Low", "Moderate" or "High".
    pub prediction: String,
    pub probabilities: ClassProbabilities,
    pub inputs_used: RawInputRecord,
    /// Per-pollutant AQI sub-indices keyed by service pollutant key.
    pub sub_aqi: BTreeMap<String, Option<f64>>,
}

impl PredictionResponse {
    /// Parse a raw response.
    ///
    /// Only structural problems are errors: the body must be an object with a
    /// string `prediction`, and `probabilities` / `inputs_used` must be
    /// objects when present. Numeric fields are coerced leniently.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| DashboardError::Validation("response is not a JSON object".to_string()))?;

        let prediction = get_str(obj, "prediction")
            .ok_or_else(|| DashboardError::Validation("missing `prediction` label".to_string()))?
            .to_string();

        let probabilities = match optional_object(obj, "probabilities")? {
            Some(probs) => ClassProbabilities {
                low: get_f64(probs, "Low"),
                moderate: get_f64(probs, "Moderate"),
                high: get_f64(probs, "High"),
            },
            None => ClassProbabilities::default(),
        };

        let inputs_used = optional_object(obj, "inputs_used")?
            .cloned()
            .unwrap_or_default();

        let sub_aqi = obj
            .get("sub_aqi")
            .and_then(|v| v.as_object())
            .map(|m| m.iter().map(|(k, v)| (k.clone(), value_as_f64(v))).collect())
            .unwrap_or_default();

        Ok(Self {
            city: get_str(obj, "city").map(str::to_string),
            aqi: get_f64(obj, "aqi"),
            aqi_category: get_str(obj, "aqi_category")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            main_pollutant: get_str(obj, "main_pollutant")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            prediction,
            probabilities,
            inputs_used,
            sub_aqi,
        })
    }
}

/// `null` and a missing key are both absent; any other non-object is invalid.
fn optional_object<'a>(obj: &'a RawInputRecord, key: &str) -> Result<Option<&'a RawInputRecord>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(m)) => Ok(Some(m)),
        Some(_) => Err(DashboardError::Validation(format!("`{}` must be an object", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_f64_coerces_strings() {
        let data = json!({"a": 1.5, "b": " 40 ", "c": "n/a", "d": "NaN", "e": null, "f": true});
        let data = data.as_object().unwrap();
        assert_eq!(get_f64(data, "a"), Some(1.5));
        assert_eq!(get_f64(data, "b"), Some(40.0));
        assert_eq!(get_f64(data, "c"), None);
        assert_eq!(get_f64(data, "d"), None);
        assert_eq!(get_f64(data, "e"), None);
        assert_eq!(get_f64(data, "f"), None);
        assert_eq!(get_f64(data, "missing"), None);
    }

    #[test]
    fn test_fmt_f64() {
        assert_eq!(fmt_f64(Some(110.04), 1), "110.0");
        assert_eq!(fmt_f64(None, 1), "—");
    }

    #[test]
    fn test_parse_full_response() {
        let raw = json!({
            "city": "Pasig",
            "prediction": "High",
            "probabilities": {"Low": 0.1, "Moderate": "0.2", "High": 0.7},
            "inputs_used": {"pm25": 40.0, "no2": null},
            "sub_aqi": {"pm25": 112.3, "so2": null},
            "aqi": 112.3,
            "aqi_category": "Unhealthy for Sensitive Groups",
            "main_pollutant": "pm25"
        });
        let resp = PredictionResponse::from_value(&raw).unwrap();
        assert_eq!(resp.city.as_deref(), Some("Pasig"));
        assert_eq!(resp.prediction, "High");
        assert_eq!(resp.probabilities.moderate, Some(0.2));
        assert_eq!(resp.aqi, Some(112.3));
        assert_eq!(resp.sub_aqi.get("pm25"), Some(&Some(112.3)));
        assert_eq!(resp.sub_aqi.get("so2"), Some(&None));
        assert_eq!(resp.main_pollutant.as_deref(), Some("pm25"));
    }

    #[test]
    fn test_parse_tolerates_missing_optionals() {
        let raw = json!({"prediction": "Low", "aqi": null, "inputs_used": null});
        let resp = PredictionResponse::from_value(&raw).unwrap();
        assert_eq!(resp.aqi, None);
        assert!(resp.inputs_used.is_empty());
        assert_eq!(resp.probabilities, ClassProbabilities::default());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            PredictionResponse::from_value(&json!([1, 2])),
            Err(DashboardError::Validation(_))
        ));
        assert!(matches!(
            PredictionResponse::from_value(&json!({"aqi": 10})),
            Err(DashboardError::Validation(_))
        ));
        assert!(matches!(
            PredictionResponse::from_value(&json!({"prediction": "Low", "probabilities": [0.1]})),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn test_probability_max_ignores_missing() {
        let probs = ClassProbabilities { low: None, moderate: Some(0.4), high: None };
        assert_eq!(probs.max(), 0.4);
        assert_eq!(ClassProbabilities::default().max(), 0.0);
    }
}
