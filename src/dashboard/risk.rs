//! Risk aggregation.
//!
//! Turns a prediction response into the headline risk summary: the model's
//! label, a confidence percentage and the AQI fields.

use serde::Serialize;

use super::types::{fmt_f64, PredictionResponse};

/// Coarse risk tier driving recommendations and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Anything other than exactly "Low" or "Moderate" is High.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Low" => RiskLevel::Low,
            "Moderate" => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::Moderate => "risk-moderate",
            RiskLevel::High => "risk-high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    /// Label as reported, for display.
    pub label: String,
    pub level: RiskLevel,
    /// 100 × the largest class probability.
    pub confidence_pct: f64,
    pub aqi_value: Option<f64>,
    pub aqi_category: Option<String>,
    pub main_pollutant: Option<String>,
}

impl RiskSummary {
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_pct)
    }

    /// AQI with one decimal, or the placeholder when absent.
    pub fn aqi_display(&self, placeholder: &str) -> String {
        match self.aqi_value {
            Some(_) => fmt_f64(self.aqi_value, 1),
            None => placeholder.to_string(),
        }
    }

    pub fn main_pollutant_display(&self) -> Option<&str> {
        self.main_pollutant.as_deref().map(pollutant_display_name)
    }
}

pub fn aggregate(response: &PredictionResponse) -> RiskSummary {
    let aqi_category = response
        .aqi_category
        .clone()
        .or_else(|| response.aqi.map(|v| aqi_category_for(v).to_string()));

    RiskSummary {
        label: response.prediction.clone(),
        level: RiskLevel::from_label(&response.prediction),
        confidence_pct: 100.0 * response.probabilities.max(),
        aqi_value: response.aqi,
        aqi_category,
        main_pollutant: response.main_pollutant.clone(),
    }
}

/// US EPA category for an overall AQI value.
pub fn aqi_category_for(aqi: f64) -> &'static str {
    match aqi {
        v if v <= 50.0 => "Good",
        v if v <= 100.0 => "Moderate",
        v if v <= 150.0 => "Unhealthy for Sensitive Groups",
        v if v <= 200.0 => "Unhealthy",
        v if v <= 300.0 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

/// Map service pollutant keys to display names; unknown keys pass through.
pub fn pollutant_display_name(key: &str) -> &str {
    match key {
        "pm25" => "PM2.5",
        "pm10" => "PM10",
        "no2" => "NO2",
        "so2" => "SO2",
        "co" => "CO",
        "o3" => "O3",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::ClassProbabilities;
    use approx::assert_relative_eq;

    fn response_with(label: &str, probs: ClassProbabilities) -> PredictionResponse {
        PredictionResponse {
            prediction: label.to_string(),
            probabilities: probs,
            ..Default::default()
        }
    }

    #[test]
    fn test_confidence_is_max_probability() {
        let resp = response_with(
            "Moderate",
            ClassProbabilities { low: Some(0.2), moderate: Some(0.5), high: Some(0.3) },
        );
        let summary = aggregate(&resp);
        assert_relative_eq!(summary.confidence_pct, 50.0, epsilon = 1e-9);
        assert_eq!(summary.confidence_display(), "50.0%");
    }

    #[test]
    fn test_probabilities_not_renormalized() {
        let resp = response_with(
            "High",
            ClassProbabilities { low: Some(0.1), moderate: None, high: Some(0.4) },
        );
        assert_relative_eq!(aggregate(&resp).confidence_pct, 40.0, epsilon = 1e-9);

        let resp = response_with("High", ClassProbabilities::default());
        assert_eq!(aggregate(&resp).confidence_pct, 0.0);
    }

    #[test]
    fn test_unknown_label_fails_safe_to_high() {
        let summary = aggregate(&response_with("Unknown", ClassProbabilities::default()));
        assert_eq!(summary.label, "Unknown");
        assert_eq!(summary.level, RiskLevel::High);

        assert_eq!(RiskLevel::from_label("low"), RiskLevel::High);
        assert_eq!(RiskLevel::from_label(""), RiskLevel::High);
        assert_eq!(RiskLevel::from_label("Low"), RiskLevel::Low);
        assert_eq!(RiskLevel::from_label("Moderate"), RiskLevel::Moderate);
    }

    #[test]
    fn test_absent_aqi_is_suppressed() {
        let summary = aggregate(&response_with("Low", ClassProbabilities::default()));
        assert_eq!(summary.aqi_value, None);
        assert_eq!(summary.aqi_category, None);
        assert_eq!(summary.aqi_display("—"), "—");
    }

    #[test]
    fn test_aqi_passthrough_and_category_fallback() {
        let mut resp = response_with("High", ClassProbabilities::default());
        resp.aqi = Some(110.0);
        resp.main_pollutant = Some("pm25".to_string());
        let summary = aggregate(&resp);
        assert_eq!(summary.aqi_display("—"), "110.0");
        assert_eq!(summary.aqi_category.as_deref(), Some("Unhealthy for Sensitive Groups"));
        assert_eq!(summary.main_pollutant.as_deref(), Some("pm25"));
        assert_eq!(summary.main_pollutant_display(), Some("PM2.5"));

        resp.aqi_category = Some("Custom".to_string());
        assert_eq!(aggregate(&resp).aqi_category.as_deref(), Some("Custom"));
    }

    #[test]
    fn test_aqi_category_bands() {
        assert_eq!(aqi_category_for(0.0), "Good");
        assert_eq!(aqi_category_for(50.0), "Good");
        assert_eq!(aqi_category_for(100.0), "Moderate");
        assert_eq!(aqi_category_for(150.0), "Unhealthy for Sensitive Groups");
        assert_eq!(aqi_category_for(200.0), "Unhealthy");
        assert_eq!(aqi_category_for(300.0), "Very Unhealthy");
        assert_eq!(aqi_category_for(301.0), "Hazardous");
    }
}
