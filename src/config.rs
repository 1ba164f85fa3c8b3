//! Dashboard configuration.
//!
//! Defaults suit local development; deployments override them through
//! environment variables.

use std::time::Duration;

use crate::dashboard::chart::ReinitPolicy;
use crate::dashboard::types::PLACEHOLDER;
use crate::error::{DashboardError, Result};

pub const ENV_PREDICTION_TIMEOUT_SECS: &str = "AQI_PREDICTION_TIMEOUT_SECS";
pub const ENV_CHART_REINIT: &str = "AQI_CHART_REINIT";
pub const ENV_PLACEHOLDER: &str = "AQI_PLACEHOLDER";

pub const DEFAULT_PREDICTION_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Upper bound on a single prediction request.
    pub prediction_timeout: Duration,
    /// What a second `ChartFeed::initialize` call does.
    pub chart_reinit: ReinitPolicy,
    /// Text shown for absent values (AQI, model accuracy).
    pub placeholder: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            prediction_timeout: DEFAULT_PREDICTION_TIMEOUT,
            chart_reinit: ReinitPolicy::Reject,
            placeholder: PLACEHOLDER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_PREDICTION_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DashboardError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_PREDICTION_TIMEOUT_SECS, raw))
            })?;
            if secs == 0 {
                return Err(DashboardError::Config(format!("{} must be greater than zero", ENV_PREDICTION_TIMEOUT_SECS)));
            }
            config.prediction_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_CHART_REINIT) {
            config.chart_reinit = match raw.trim().to_lowercase().as_str() {
                "reject" => ReinitPolicy::Reject,
                "replace" => ReinitPolicy::Replace,
                other => {
                    return Err(DashboardError::Config(format!(
                        "{} must be 'reject' or 'replace', got '{}'",
                        ENV_CHART_REINIT, other
                    )))
                }
            };
        }

        if let Some(raw) = lookup(ENV_PLACEHOLDER) {
            config.placeholder = raw;
        }

        tracing::debug!("Dashboard config: {:?}", config);
        Ok(config)
    }
}
