//! Dashboard session.
//!
//! Drives one dashboard: loads the city list and model metadata, runs
//! prediction cycles through the view builder, feeds the chart and hands
//! the result to the view. Each prediction is tagged with a ticket so that a
//! slow, superseded response can never overwrite a newer one.

use serde_json::Value;

use super::chart::{ChartBackend, ChartFeed};
use super::types::PredictionResponse;
use super::view_builder::{build_prediction_view, format_model_accuracy, parse_cities};
use super::view_models::{CityOptions, Notice, PredictionViewModel};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

/// Network side of the dashboard.
#[cfg(feature = "client")]
#[allow(async_fn_in_trait)]
pub trait DashboardTransport {
    async fn fetch_cities(&self) -> Result<Value>;
    async fn fetch_model_info(&self) -> Result<Value>;
    async fn fetch_prediction(&self, city: &str) -> Result<Value>;
}

/// Rendering side of the dashboard.
pub trait DashboardView {
    fn render(&mut self, view: &PredictionViewModel);
    /// Restore the "no results" state.
    fn clear_results(&mut self);
    fn show_notice(&mut self, notice: &Notice);
    fn set_cities(&mut self, cities: &CityOptions);
    fn set_model_accuracy(&mut self, text: &str);
}

// ============================================================================
// Request Sequencing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Hands out increasing tickets; only the newest is current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Rendered(PredictionViewModel),
    /// A newer request was issued; this result was dropped.
    Stale,
    Failed(DashboardError),
}

// ============================================================================
// Session
// ============================================================================

pub struct DashboardSession<B: ChartBackend, V: DashboardView> {
    config: DashboardConfig,
    chart: ChartFeed<B>,
    view: V,
    sequencer: RequestSequencer,
    current: Option<PredictionViewModel>,
}

impl<B: ChartBackend, V: DashboardView> DashboardSession<B, V> {
    /// Create a session and draw the empty chart.
    pub fn new(config: DashboardConfig, backend: B, view: V) -> Result<Self> {
        let mut chart = ChartFeed::new(backend, config.chart_reinit);
        chart.initialize()?;

        Ok(Self {
            config,
            chart,
            view,
            sequencer: RequestSequencer::default(),
            current: None,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn chart(&self) -> &ChartFeed<B> {
        &self.chart
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Last rendered prediction, if results are showing.
    pub fn current(&self) -> Option<&PredictionViewModel> {
        self.current.as_ref()
    }

    /// Apply a city-list fetch result. Failures degrade to a placeholder.
    pub fn apply_cities(&mut self, result: Result<Value>) -> CityOptions {
        let cities = match result {
            Ok(payload) => parse_cities(&payload),
            Err(e) => {
                tracing::warn!("Failed to load cities: {}", e);
                self.view.show_notice(&Notice::error(CityOptions::UNAVAILABLE_TEXT));
                CityOptions::Unavailable
            }
        };

        match &cities {
            CityOptions::Available(list) => tracing::info!("Loaded {} cities", list.len()),
            CityOptions::Unavailable => tracing::debug!("No cities available"),
        }
        self.view.set_cities(&cities);
        cities
    }

    /// Apply a model-info fetch result. Failures degrade to the placeholder.
    pub fn apply_model_info(&mut self, result: Result<Value>) -> String {
        let text = match result {
            Ok(info) => format_model_accuracy(&info, &self.config.placeholder),
            Err(e) => {
                tracing::warn!("Failed to load model info: {}", e);
                self.view.show_notice(&Notice::error("Could not load model information"));
                self.config.placeholder.clone()
            }
        };

        self.view.set_model_accuracy(&text);
        text
    }

    /// Start a prediction cycle. Supersedes any cycle still in flight.
    pub fn begin_prediction(&mut self, city: &str) -> RequestTicket {
        let ticket = self.sequencer.issue();
        tracing::info!("Prediction #{} requested for {}", ticket.sequence(), city);
        ticket
    }

    /// Finish a prediction cycle with the transport's result.
    ///
    /// Stale tickets are ignored, whether they succeeded or not. Errors abort
    /// the cycle: nothing partial is rendered and results are cleared.
    pub fn finish_prediction(&mut self, ticket: RequestTicket, result: Result<Value>) -> PredictionOutcome {
        if !self.sequencer.is_current(ticket) {
            tracing::warn!("Discarding stale prediction #{}", ticket.sequence());
            return PredictionOutcome::Stale;
        }

        match self.build_and_chart(result) {
            Ok(view_model) => {
                self.view.render(&view_model);
                self.current = Some(view_model.clone());
                tracing::info!(
                    "Prediction #{} rendered: {} ({})",
                    ticket.sequence(),
                    view_model.risk.summary.label,
                    view_model.risk.confidence_display
                );
                PredictionOutcome::Rendered(view_model)
            }
            Err(e) => {
                tracing::warn!("Prediction #{} failed: {}", ticket.sequence(), e);
                self.current = None;
                self.view.clear_results();
                self.view.show_notice(&Notice::error(e.user_message()));
                PredictionOutcome::Failed(e)
            }
        }
    }

    fn build_and_chart(&mut self, result: Result<Value>) -> Result<PredictionViewModel> {
        let response = PredictionResponse::from_value(&result?)?;
        let view_model = build_prediction_view(&response, &self.config.placeholder);
        self.chart.update(&view_model.readings)?;
        Ok(view_model)
    }
}

#[cfg(feature = "client")]
impl<B: ChartBackend, V: DashboardView> DashboardSession<B, V> {
    pub async fn load_cities<T: DashboardTransport>(&mut self, transport: &T) -> CityOptions {
        let result = transport.fetch_cities().await;
        self.apply_cities(result)
    }

    pub async fn load_model_info<T: DashboardTransport>(&mut self, transport: &T) -> String {
        let result = transport.fetch_model_info().await;
        self.apply_model_info(result)
    }

    /// Run a full prediction cycle, bounded by the configured timeout.
    ///
    /// The session is borrowed for the whole request, so calls through here
    /// never overlap and never come back `Stale`. Callers that let a newer
    /// request supersede one in flight drive `begin_prediction` and
    /// `finish_prediction` themselves.
    pub async fn predict<T: DashboardTransport>(&mut self, transport: &T, city: &str) -> PredictionOutcome {
        let ticket = self.begin_prediction(city);
        let timeout = self.config.prediction_timeout;

        let result = match tokio::time::timeout(timeout, transport.fetch_prediction(city)).await {
            Ok(r) => r,
            Err(_) => Err(DashboardError::Timeout(timeout)),
        };

        self.finish_prediction(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_only_latest_is_current() {
        let mut seq = RequestSequencer::default();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }
}
