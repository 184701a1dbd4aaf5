#![forbid(unsafe_code)]

//! Headless layout + SVG rendering for aligned bout trajectories.
//!
//! [`layout_chart`] turns an [`AlignedChart`] into pixel-space geometry ([`model::ChartLayout`]);
//! [`svg::render_chart_svg`] serializes that geometry under a given [`selection::Selection`].

pub mod chart;
pub mod model;
pub mod opacity;
pub mod selection;
pub mod svg;
pub mod text;
pub mod tooltip;

use crate::model::{ChartLayout, Margin};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use boutline_core::{AlignedChart, ChartConfig};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] boutline_core::Error),
    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub margin: Margin,
    /// Short reference name for the bar and headings; derived from the chart when `None`.
    pub reference_label: Option<String>,
    pub title: Option<String>,
    /// Lines printed at the bottom of the reference bar.
    pub attribution: Vec<String>,
    pub opacity_seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            viewport_width: 1200.0,
            viewport_height: 800.0,
            margin: Margin::default(),
            reference_label: None,
            title: None,
            attribution: Vec::new(),
            opacity_seed: None,
        }
    }
}

impl LayoutOptions {
    /// Defaults for headless SVG output (fixed 1200x800 canvas).
    pub fn headless_svg_defaults() -> Self {
        Self::default()
    }

    /// Reads `chart.*` and `reference.label` from a merged config.
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let mut out = Self {
            reference_label: Some(config.reference_label()),
            ..Self::default()
        };

        if let Some(title) = config.require_str("chart.title")? {
            out.title = Some(title.to_string());
        }
        if let Some(w) = config.require_f64("chart.width")? {
            out.viewport_width = w;
        }
        if let Some(h) = config.require_f64("chart.height")? {
            out.viewport_height = h;
        }
        out.opacity_seed = config.require_u64("chart.opacitySeed")?;

        out.attribution = match config.get("chart.attribution") {
            None => Vec::new(),
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(other) => {
                return Err(Error::InvalidOptions {
                    message: format!("chart.attribution must be a string or array, got {other}"),
                });
            }
        };

        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<()> {
        let inner_w = self.viewport_width - self.margin.left - self.margin.right;
        let inner_h = self.viewport_height - self.margin.top - self.margin.bottom;
        if !(inner_w.is_finite() && inner_h.is_finite() && inner_w > 0.0 && inner_h > 0.0) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "viewport {}x{} leaves no room inside the margins",
                    self.viewport_width, self.viewport_height
                ),
            });
        }
        Ok(())
    }
}

pub fn layout_chart(chart: &AlignedChart, options: &LayoutOptions) -> Result<ChartLayout> {
    options.validate()?;
    Ok(chart::layout_aligned_chart(chart, options))
}
