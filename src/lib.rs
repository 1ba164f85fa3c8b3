//! AQI Dashboard Core
//!
//! Client-side result pipeline for an air-quality risk prediction service.
//!
//! - `dashboard/`: normalization, classification, risk summary,
//!   recommendations, chart feed and the session that drives them
//! - `config`: environment-driven settings
//! - `error`: error taxonomy

pub mod config;
pub mod dashboard;
pub mod error;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use dashboard::chart::{ChartBackend, ChartFeed, InMemoryChart, ReinitPolicy};
pub use dashboard::readings::{normalize, CanonicalReadings, ReadingField};
pub use dashboard::session::{DashboardSession, DashboardView, PredictionOutcome};
#[cfg(feature = "client")]
pub use dashboard::session::DashboardTransport;
pub use dashboard::types::{PredictionResponse, RawInputRecord};
pub use error::{DashboardError, Result};
