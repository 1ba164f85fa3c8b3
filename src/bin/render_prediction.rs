// Render a saved prediction response through the dashboard pipeline.
//
// Usage: cargo run --features cli --bin render_prediction -- <response.json> [model_info.json]
//
// Prints the view model as JSON followed by the chart bars.

use std::path::PathBuf;

use anyhow::{bail, Context};
use aqi_dashboard::dashboard::view_models::{CityOptions, Notice, PredictionViewModel};
use aqi_dashboard::{DashboardConfig, DashboardSession, DashboardView, InMemoryChart, PredictionOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// View that prints rendered models to stdout and notices to stderr.
#[derive(Default)]
struct StdoutView {
    model_accuracy: Option<String>,
}

impl DashboardView for StdoutView {
    fn render(&mut self, view: &PredictionViewModel) {
        match serde_json::to_string_pretty(view) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Failed to serialize view model: {}", e),
        }
    }

    fn clear_results(&mut self) {}

    fn show_notice(&mut self, notice: &Notice) {
        eprintln!("[notice] {}", notice.message);
    }

    fn set_cities(&mut self, _cities: &CityOptions) {}

    fn set_model_accuracy(&mut self, text: &str) {
        self.model_accuracy = Some(text.to_string());
    }
}

fn read_json(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_dashboard=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(response_path) = args.next().map(PathBuf::from) else {
        bail!("usage: render_prediction <response.json> [model_info.json]");
    };
    let model_info_path = args.next().map(PathBuf::from);

    let config = DashboardConfig::from_env().context("Invalid dashboard configuration")?;
    let mut session = DashboardSession::new(config, InMemoryChart::new(), StdoutView::default())?;

    if let Some(path) = model_info_path {
        let info = read_json(&path);
        session.apply_model_info(info.map_err(|e| aqi_dashboard::DashboardError::Transport(e.to_string())));
    }

    let response = read_json(&response_path)?;
    let city = response
        .get("city")
        .and_then(|c| c.as_str())
        .unwrap_or("(unspecified)")
        .to_string();

    let ticket = session.begin_prediction(&city);
    match session.finish_prediction(ticket, Ok(response)) {
        PredictionOutcome::Rendered(_) => {}
        PredictionOutcome::Failed(e) => bail!("Prediction could not be rendered: {}", e),
        PredictionOutcome::Stale => bail!("Prediction was superseded"),
    }

    if let Some(accuracy) = &session.view().model_accuracy {
        println!("Model accuracy: {}", accuracy);
    }

    if let Some(chart) = session.chart().handle() {
        for (label, value) in chart.bars() {
            println!("{:>9} | {:.1}", label, value);
        }
    }

    Ok(())
}
