//! Dashboard Pipeline Module
//!
//! Turns a raw prediction response into the dashboard view model.
//!
//! ## Stages
//! 1. Readings - alias resolution into eight canonical readings
//! 2. Classify - per-reading status tier
//! 3. Risk - risk label, confidence and AQI summary
//! 4. Advice - recommendation text per risk tier
//! 5. Chart - persistent bar chart of the inputs used

pub mod types;
pub mod utils;
pub mod readings;
pub mod risk;
pub mod advice;
pub mod chart;
pub mod view_models;
pub mod view_builder;
pub mod session;

pub use session::DashboardSession;
pub use view_builder::build_prediction_view;
