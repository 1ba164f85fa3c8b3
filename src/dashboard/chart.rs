//! Chart feed.
//!
//! Owns the single long-lived bar chart handle. The drawing library sits
//! behind `ChartBackend`; `InMemoryChart` is a backend that just records
//! what would be drawn.

use serde::Serialize;

use super::readings::{CanonicalReadings, ReadingField};
use crate::error::{DashboardError, Result};

pub const CHART_BAR_COUNT: usize = 8;

/// Chart creation parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub title: String,
    pub labels: Vec<&'static str>,
    pub initial_values: Vec<f64>,
}

impl ChartConfig {
    /// Eight fixed bars, all zero.
    pub fn inputs_bar_chart() -> Self {
        Self {
            title: "Inputs used".to_string(),
            labels: ReadingField::ALL.iter().map(|f| f.chart_label()).collect(),
            initial_values: vec![0.0; CHART_BAR_COUNT],
        }
    }
}

/// Chart drawing library.
pub trait ChartBackend {
    type Handle;

    fn create_chart(&mut self, config: &ChartConfig) -> Self::Handle;

    /// Overwrite bar values and redraw.
    fn update_chart(&mut self, handle: &mut Self::Handle, data: &[f64]);
}

/// What a second `initialize` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReinitPolicy {
    /// Keep the existing handle and return `ChartAlreadyInitialized`.
    #[default]
    Reject,
    /// Create a fresh chart and drop the old handle.
    Replace,
}

#[derive(Debug)]
pub enum ChartState<H> {
    Uninitialized,
    Ready(H),
}

pub struct ChartFeed<B: ChartBackend> {
    backend: B,
    state: ChartState<B::Handle>,
    policy: ReinitPolicy,
}

impl<B: ChartBackend> ChartFeed<B> {
    pub fn new(backend: B, policy: ReinitPolicy) -> Self {
        Self {
            backend,
            state: ChartState::Uninitialized,
            policy,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready(_))
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.is_ready() {
            match self.policy {
                ReinitPolicy::Reject => return Err(DashboardError::ChartAlreadyInitialized),
                ReinitPolicy::Replace => tracing::debug!("Replacing existing chart"),
            }
        }

        let handle = self.backend.create_chart(&ChartConfig::inputs_bar_chart());
        self.state = ChartState::Ready(handle);
        Ok(())
    }

    /// Push readings into the chart in fixed label order.
    pub fn update(&mut self, readings: &CanonicalReadings) -> Result<()> {
        let ChartState::Ready(handle) = &mut self.state else {
            return Err(DashboardError::ChartNotReady);
        };

        let values = readings.as_chart_values();
        self.backend.update_chart(handle, &values);
        tracing::debug!("Chart redrawn with {:?}", values);
        Ok(())
    }

    pub fn handle(&self) -> Option<&B::Handle> {
        match &self.state {
            ChartState::Ready(h) => Some(h),
            ChartState::Uninitialized => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Recorded state of one bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartModel {
    pub id: usize,
    pub title: String,
    pub labels: Vec<&'static str>,
    pub values: Vec<f64>,
    pub redraws: usize,
}

impl BarChartModel {
    /// (label, value) pairs in bar order.
    pub fn bars(&self) -> Vec<(&'static str, f64)> {
        self.labels.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

/// Backend that keeps chart state in memory.
#[derive(Debug, Default)]
pub struct InMemoryChart {
    created: usize,
}

impl InMemoryChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts created so far.
    pub fn charts_created(&self) -> usize {
        self.created
    }
}

impl ChartBackend for InMemoryChart {
    type Handle = BarChartModel;

    fn create_chart(&mut self, config: &ChartConfig) -> BarChartModel {
        self.created += 1;
        BarChartModel {
            id: self.created,
            title: config.title.clone(),
            labels: config.labels.clone(),
            values: config.initial_values.clone(),
            redraws: 0,
        }
    }

    fn update_chart(&mut self, handle: &mut BarChartModel, data: &[f64]) {
        handle.values.clear();
        handle.values.extend_from_slice(data);
        handle.redraws += 1;
    }
}
