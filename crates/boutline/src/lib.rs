#![forbid(unsafe_code)]

//! `boutline` charts boxers' careers aligned on their bouts against one reference fighter.
//!
//! The core pipeline (CSV ingest and alignment) is re-exported from `boutline-core`.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`boutline::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use boutline_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use boutline_render::model::ChartLayout;
    pub use boutline_render::selection::{LegendStyle, LineStyle, Selection, legend_style, line_style};
    pub use boutline_render::svg::{SvgRenderOptions, render_chart_svg};
    pub use boutline_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use boutline_render::{LayoutOptions, layout_chart};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] boutline_core::Error),
        #[error(transparent)]
        Render(#[from] boutline_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Turns a chart name (a file stem, a reference fighter) into an SVG `id` token.
    ///
    /// ASCII letters and digits are kept lowercased, every other run of characters becomes one
    /// `-`, and ids that would start with a digit get a `chart-` prefix.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 6);
        for ch in raw.chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch.to_ascii_lowercase());
            } else if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        let trimmed = out.trim_end_matches('-');
        match trimmed.chars().next() {
            None => "chart".to_string(),
            Some(c) if c.is_ascii_digit() => format!("chart-{trimmed}"),
            Some(_) => trimmed.to_string(),
        }
    }

    /// Returns layout defaults intended for headless SVG output.
    pub fn headless_layout_options() -> LayoutOptions {
        LayoutOptions::headless_svg_defaults()
    }

    /// Synchronous layout helper (executor-free): CSV text to chart geometry.
    pub fn layout_bouts_sync(
        engine: &boutline_core::Engine,
        text: &str,
        layout_options: &LayoutOptions,
    ) -> Result<ChartLayout> {
        let (_, chart) = engine.load_and_align_sync(text)?;
        Ok(boutline_render::layout_chart(&chart, layout_options)?)
    }

    pub async fn layout_bouts(
        engine: &boutline_core::Engine,
        text: &str,
        layout_options: &LayoutOptions,
    ) -> Result<ChartLayout> {
        layout_bouts_sync(engine, text, layout_options)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        engine: &boutline_core::Engine,
        text: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
        selection: &Selection,
    ) -> Result<String> {
        let layout = layout_bouts_sync(engine, text, layout_options)?;
        Ok(render_chart_svg(&layout, svg_options, selection)?)
    }

    pub async fn render_svg(
        engine: &boutline_core::Engine,
        text: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
        selection: &Selection,
    ) -> Result<String> {
        render_svg_sync(engine, text, layout_options, svg_options, selection)
    }

    /// Bundles an [`Engine`](boutline_core::Engine) and common options for headless rendering.
    ///
    /// It stays runtime-agnostic: all work is CPU-bound and does not perform I/O.
    #[derive(Clone)]
    pub struct HeadlessRenderer {
        pub engine: boutline_core::Engine,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                engine: boutline_core::Engine::new(),
                layout: LayoutOptions::headless_svg_defaults(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Merges `overrides` onto the defaults and derives layout options from the result.
        pub fn with_config(mut self, overrides: boutline_core::ChartConfig) -> Result<Self> {
            self.engine = self.engine.with_config(overrides);
            self.layout = LayoutOptions {
                text_measurer: self.layout.text_measurer.clone(),
                ..LayoutOptions::from_config(self.engine.config())?
            };
            Ok(self)
        }

        pub fn load_and_align_sync(
            &self,
            text: &str,
        ) -> Result<(boutline_core::Dataset, boutline_core::AlignedChart)> {
            Ok(self.engine.load_and_align_sync(text)?)
        }

        pub fn layout_bouts_sync(&self, text: &str) -> Result<ChartLayout> {
            layout_bouts_sync(&self.engine, text, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str, selection: &Selection) -> Result<String> {
            render_svg_sync(&self.engine, text, &self.layout, &self.svg, selection)
        }

        pub fn render_svg_sync_with_diagram_id(
            &self,
            text: &str,
            selection: &Selection,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            render_svg_sync(&self.engine, text, &self.layout, &svg, selection)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            selection: &Selection,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(
                &self.engine,
                text,
                &self.layout,
                &self.svg,
                selection,
                raster,
            )
        }
    }

}
