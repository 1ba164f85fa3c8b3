//! Error types for the dashboard core.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    /// Network or HTTP-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response parsed but is missing required structure.
    #[error("invalid prediction response: {0}")]
    Validation(String),

    #[error("prediction request timed out after {0:?}")]
    Timeout(Duration),

    #[error("chart has not been initialized")]
    ChartNotReady,

    #[error("chart is already initialized")]
    ChartAlreadyInitialized,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// Message shown to the user in the error notice.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Transport(msg) => format!("Prediction failed: {}", msg),
            DashboardError::Validation(_) => "Prediction failed: the server returned an unexpected response".to_string(),
            DashboardError::Timeout(_) => "Prediction failed: the server took too long to respond".to_string(),
            other => other.to_string(),
        }
    }
}
