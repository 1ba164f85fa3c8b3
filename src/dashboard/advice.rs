//! Recommendation text.
//!
//! Static advisory lines selected wholesale by risk tier. Nothing here is
//! templated from the numeric inputs.

use serde::Serialize;

use super::risk::RiskLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationSet {
    pub general: Vec<&'static str>,
    pub sensitive_groups: Vec<&'static str>,
    pub actions: Vec<&'static str>,
}

impl RecommendationSet {
    fn from_static(general: &[&'static str], sensitive_groups: &[&'static str], actions: &[&'static str]) -> Self {
        Self {
            general: general.to_vec(),
            sensitive_groups: sensitive_groups.to_vec(),
            actions: actions.to_vec(),
        }
    }
}

// ============================================================================
// Advisory Text
// ============================================================================

const LOW_GENERAL: &[&str] = &[
    "Air quality is satisfactory and poses little or no risk.",
    "Outdoor activities are safe for everyone.",
];
const LOW_SENSITIVE: &[&str] = &["No special precautions are needed."];
const LOW_ACTIONS: &[&str] = &["Continue using public transit and active commuting."];

const MODERATE_GENERAL: &[&str] = &[
    "Air quality is acceptable, though some pollutants may affect a small number of people.",
];
const MODERATE_SENSITIVE: &[&str] = &[
    "Reduce prolonged or heavy outdoor exertion.",
    "Watch for symptoms such as coughing or shortness of breath.",
];
const MODERATE_ACTIONS: &[&str] = &[
    "Reduce vehicle idling.",
    "Avoid outdoor burning of waste and leaves.",
];

const HIGH_GENERAL: &[&str] = &[
    "Everyone may begin to experience health effects.",
    "Avoid prolonged outdoor exertion.",
];
const HIGH_SENSITIVE: &[&str] = &[
    "Avoid outdoor activity.",
    "Wear a well-fitted mask if you must go outside.",
];
const HIGH_ACTIONS: &[&str] = &[
    "Consider emergency pollution control measures.",
    "Limit traffic and industrial emissions where possible.",
];

pub fn low_risk_set() -> RecommendationSet {
    RecommendationSet::from_static(LOW_GENERAL, LOW_SENSITIVE, LOW_ACTIONS)
}

pub fn moderate_risk_set() -> RecommendationSet {
    RecommendationSet::from_static(MODERATE_GENERAL, MODERATE_SENSITIVE, MODERATE_ACTIONS)
}

pub fn high_risk_set() -> RecommendationSet {
    RecommendationSet::from_static(HIGH_GENERAL, HIGH_SENSITIVE, HIGH_ACTIONS)
}

/// Select recommendations. First match wins:
/// 1. Low risk or AQI <= 50: low set
/// 2. Moderate risk or AQI <= 100: moderate set
/// 3. otherwise: high set
///
/// An absent AQI never satisfies a numeric condition.
pub fn recommend(level: RiskLevel, aqi: Option<f64>) -> RecommendationSet {
    let aqi_at_most = |limit: f64| aqi.is_some_and(|v| v <= limit);

    if level == RiskLevel::Low || aqi_at_most(50.0) {
        low_risk_set()
    } else if level == RiskLevel::Moderate || aqi_at_most(100.0) {
        moderate_risk_set()
    } else {
        high_risk_set()
    }
}
