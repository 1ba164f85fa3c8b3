//! View Builder - Converts prediction responses to view models
//!
//! Runs normalization, classification, risk aggregation and recommendation
//! selection in order. Also formats the city list and model metadata.

use serde_json::Value;

use super::advice::recommend;
use super::readings::{normalize, CanonicalReadings, ReadingField};
use super::risk::{aggregate, RiskSummary};
use super::types::{value_as_f64, PredictionResponse};
use super::utils::classify::{classify, reading_kind, ReadingKind, AMBIENT_CSS_CLASS};
use super::view_models::*;

/// Build the complete view model for one prediction.
pub fn build_prediction_view(response: &PredictionResponse, placeholder: &str) -> PredictionViewModel {
    let readings = normalize(&response.inputs_used);
    let summary = aggregate(response);
    let recommendations = recommend(summary.level, summary.aqi_value);

    PredictionViewModel {
        city: response.city.clone(),
        readings,
        cards: build_cards(&readings, response),
        risk: build_risk_panel(summary, placeholder),
        recommendations,
        chart_values: readings.as_chart_values(),
    }
}

fn build_cards(readings: &CanonicalReadings, response: &PredictionResponse) -> Vec<ReadingCard> {
    ReadingField::ALL
        .iter()
        .map(|&field| build_card(field, readings.get(field), response))
        .collect()
}

fn build_card(field: ReadingField, value: f64, response: &PredictionResponse) -> ReadingCard {
    let sub_aqi = response
        .sub_aqi
        .get(field.service_key())
        .copied()
        .flatten();

    match reading_kind(field) {
        ReadingKind::Tiered(policy) => {
            let status = classify(value, policy);
            ReadingCard {
                field,
                label: field.label(),
                value,
                value_display: format!("{:.1}", value),
                status: Some(status),
                status_label: status.label(),
                css_class: status.css_class(),
                sub_aqi,
            }
        }
        ReadingKind::Ambient { unit } => ReadingCard {
            field,
            label: field.label(),
            value,
            value_display: format!("{:.1}{}", value, unit),
            status: None,
            status_label: "",
            css_class: AMBIENT_CSS_CLASS,
            sub_aqi: None,
        },
    }
}

fn build_risk_panel(summary: RiskSummary, placeholder: &str) -> RiskPanel {
    RiskPanel {
        css_class: summary.level.css_class(),
        confidence_display: summary.confidence_display(),
        aqi_display: summary.aqi_display(placeholder),
        aqi_category_display: summary
            .aqi_category
            .clone()
            .unwrap_or_else(|| placeholder.to_string()),
        main_pollutant_display: summary
            .main_pollutant_display()
            .unwrap_or(placeholder)
            .to_string(),
        summary,
    }
}

// ============================================================================
// Model Info and City List
// ============================================================================

const MODEL_ACCURACY_ALIASES: &[&str] = &["modelAccuracy", "model_accuracy"];

/// Format the model accuracy from a model-info payload.
/// - <= 1: fraction shown as a percentage ("87.5%")
/// - otherwise: the payload's own text ("87.0", "87.5%")
/// - absent: placeholder
pub fn format_model_accuracy(info: &Value, placeholder: &str) -> String {
    let accuracy = info.as_object().and_then(|obj| {
        MODEL_ACCURACY_ALIASES
            .iter()
            .filter_map(|key| obj.get(*key))
            .find(|v| v.is_number() || v.as_str().is_some_and(|s| !s.trim().is_empty()))
    });

    let Some(value) = accuracy else {
        return placeholder.to_string();
    };

    match (value_as_f64(value), value) {
        (Some(a), _) if a <= 1.0 => format!("{:.1}%", a * 100.0),
        (_, Value::String(s)) => s.trim().to_string(),
        (_, other) => other.to_string(),
    }
}

/// Parse a city-list payload.
///
/// Accepts a list of names, an object whose keys are the names, or either
/// form under a `cities` key alongside any other metadata.
pub fn parse_cities(payload: &Value) -> CityOptions {
    let inner = match payload {
        Value::Object(obj) if obj.contains_key("cities") => &obj["cities"],
        other => other,
    };

    let names: Vec<&str> = match inner {
        Value::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        Value::Object(obj) => obj.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    };

    let cities: Vec<String> = names
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if cities.is_empty() {
        CityOptions::Unavailable
    } else {
        CityOptions::Available(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::advice::{high_risk_set, low_risk_set};
    use crate::dashboard::risk::RiskLevel;
    use crate::dashboard::utils::classify::StatusTier;
    use serde_json::json;

    fn response(raw: Value) -> PredictionResponse {
        PredictionResponse::from_value(&raw).unwrap()
    }

    #[test]
    fn test_build_view_end_to_end() {
        let resp = response(json!({
            "prediction": "High",
            "aqi": 110,
            "probabilities": {"Low": 0.1, "Moderate": 0.2, "High": 0.7},
            "inputs_used": {"pm25": "40", "no2": 25, "temperature": 30},
            "sub_aqi": {"pm25": 112.3, "no2": null}
        }));
        let view = build_prediction_view(&resp, "—");

        assert_eq!(view.chart_values, [40.0, 0.0, 25.0, 0.0, 0.0, 0.0, 30.0, 0.0]);
        assert_eq!(view.status_of(ReadingField::Pm25), Some(StatusTier::Poor));
        assert_eq!(view.status_of(ReadingField::No2), Some(StatusTier::Moderate));
        assert_eq!(view.status_of(ReadingField::So2), Some(StatusTier::NoReading));
        assert_eq!(view.status_of(ReadingField::Pm10), Some(StatusTier::Good));
        assert_eq!(view.status_of(ReadingField::Temperature), None);
        assert_eq!(view.risk.confidence_display, "70.0%");
        assert_eq!(view.risk.summary.level, RiskLevel::High);
        assert_eq!(view.recommendations, high_risk_set());

        let pm25 = view.card(ReadingField::Pm25).unwrap();
        assert_eq!(pm25.sub_aqi, Some(112.3));
        assert_eq!(view.card(ReadingField::No2).unwrap().sub_aqi, None);
    }

    #[test]
    fn test_ambient_cards_are_neutral() {
        let resp = response(json!({
            "prediction": "Low",
            "inputs_used": {"temperature": 30, "humidity": 65}
        }));
        let view = build_prediction_view(&resp, "—");

        let temp = view.card(ReadingField::Temperature).unwrap();
        assert_eq!(temp.value_display, "30.0°C");
        assert_eq!(temp.css_class, AMBIENT_CSS_CLASS);
        assert_eq!(view.card(ReadingField::Humidity).unwrap().value_display, "65.0%");
    }

    #[test]
    fn test_missing_aqi_uses_placeholder() {
        let resp = response(json!({"prediction": "Low"}));
        let view = build_prediction_view(&resp, "n/a");
        assert_eq!(view.risk.aqi_display, "n/a");
        assert_eq!(view.risk.aqi_category_display, "n/a");
        assert_eq!(view.risk.main_pollutant_display, "n/a");
        assert_eq!(view.recommendations, low_risk_set());
        assert_eq!(view.chart_values, [0.0; 8]);
    }

    #[test]
    fn test_model_accuracy_formatting() {
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": 0.875}), "—"), "87.5%");
        assert_eq!(format_model_accuracy(&json!({"model_accuracy": 1}), "—"), "100.0%");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": 87.5}), "—"), "87.5");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": 87.0}), "—"), "87.0");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": 87}), "—"), "87");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": "87.5%"}), "—"), "87.5%");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": "0.9"}), "—"), "90.0%");
        assert_eq!(format_model_accuracy(&json!({"modelAccuracy": "", "model_accuracy": 0.5}), "—"), "50.0%");
        assert_eq!(format_model_accuracy(&json!({"model_accuracy": null}), "—"), "—");
        assert_eq!(format_model_accuracy(&json!({}), "—"), "—");
    }

    #[test]
    fn test_parse_cities_shapes() {
        let expected = CityOptions::Available(vec!["Makati City".to_string(), "Pasig".to_string()]);
        assert_eq!(parse_cities(&json!(["Makati City", "Pasig"])), expected);
        assert_eq!(parse_cities(&json!({"Makati City": {}, "Pasig": 1})), expected);
        assert_eq!(parse_cities(&json!({"cities": ["Makati City", "Pasig"]})), expected);
        assert_eq!(parse_cities(&json!({"cities": {"Makati City": true, "Pasig": true}})), expected);
    }

    #[test]
    fn test_parse_cities_wrapper_with_metadata() {
        let expected = CityOptions::Available(vec!["Caloocan".to_string(), "Manila".to_string()]);
        assert_eq!(parse_cities(&json!({"cities": ["Caloocan", "Manila"], "count": 2})), expected);
        assert_eq!(
            parse_cities(&json!({"source": "dashboard", "cities": {"Caloocan": {}, "Manila": {}}})),
            expected
        );
    }

    #[test]
    fn test_parse_cities_wrong_wrapper_type_is_unavailable() {
        assert_eq!(parse_cities(&json!({"cities": "Pasig"})), CityOptions::Unavailable);
        assert_eq!(parse_cities(&json!({"cities": null, "count": 0})), CityOptions::Unavailable);
    }

    #[test]
    fn test_parse_cities_skips_blank_names() {
        assert_eq!(parse_cities(&json!({" ": 1, "": 2})), CityOptions::Unavailable);
        assert_eq!(
            parse_cities(&json!({" Pasig ": 1, "": 2})),
            CityOptions::Available(vec!["Pasig".to_string()])
        );
        assert_eq!(
            parse_cities(&json!(["  ", "Taguig", 3])),
            CityOptions::Available(vec!["Taguig".to_string()])
        );
    }

    #[test]
    fn test_parse_cities_empty_is_unavailable() {
        assert_eq!(parse_cities(&json!([])), CityOptions::Unavailable);
        assert_eq!(parse_cities(&json!({"cities": []})), CityOptions::Unavailable);
        assert_eq!(parse_cities(&json!(null)), CityOptions::Unavailable);
        assert_eq!(parse_cities(&json!("Pasig")), CityOptions::Unavailable);
    }
}
