#![forbid(unsafe_code)]

//! Bout-record ingestion and reference-opponent alignment (headless).
//!
//! Pipeline: CSV text -> [`Dataset`] -> [`AlignedChart`]. Each stage is a pure function of its
//! inputs and returns a fresh value; nothing is mutated in place between stages.
//!
//! Design goals:
//! - deterministic output for identical input and config
//! - lenient ingestion (bad rows are skipped, not fatal)
//! - runtime-agnostic async APIs (no specific executor required)

pub mod align;
pub mod bout;
pub mod color;
pub mod config;
pub mod date;
pub mod error;
pub mod index;
pub mod ingest;

pub use align::{
    AlignMode, AlignOptions, AlignedChart, SortOrder, Trajectory, TrajectoryPoint, align,
};
pub use bout::{BoxerRecord, Fight, FightResult};
pub use config::ChartConfig;
pub use error::{Error, Result};
pub use index::ReferenceIndex;
pub use ingest::{Dataset, IngestStats, load_bouts};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: ChartConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, overrides: ChartConfig) -> Self {
        // Merge overrides onto defaults so unset keys keep working.
        self.config.deep_merge(overrides.as_value());
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    pub fn align_options(&self) -> Result<AlignOptions> {
        AlignOptions::from_config(&self.config)
    }

    /// Synchronous variant of [`Engine::load_bouts`].
    pub fn load_bouts_sync(&self, text: &str) -> Result<Dataset> {
        ingest::load_bouts(text)
    }

    /// Synchronous variant of [`Engine::align`].
    ///
    /// Useful for render loops that are synchronous; the work is CPU-bound and does not perform
    /// I/O.
    pub fn align_sync(&self, dataset: &Dataset) -> Result<AlignedChart> {
        let options = self.align_options()?;
        align::align(&dataset.boxers, &options)
    }

    /// Loads and aligns in one step.
    pub fn load_and_align_sync(&self, text: &str) -> Result<(Dataset, AlignedChart)> {
        let dataset = self.load_bouts_sync(text)?;
        let chart = self.align_sync(&dataset)?;
        Ok((dataset, chart))
    }

    pub async fn load_bouts(&self, text: &str) -> Result<Dataset> {
        self.load_bouts_sync(text)
    }

    pub async fn align(&self, dataset: &Dataset) -> Result<AlignedChart> {
        self.align_sync(dataset)
    }
}

#[cfg(test)]
mod tests;
