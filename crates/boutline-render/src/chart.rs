//! Pixel-space layout of an [`AlignedChart`].
//!
//! Headings are positioned in canvas coordinates. Everything else (career lines, reference bar,
//! legend) is positioned in plot coordinates, i.e. relative to the top-left corner of the margin
//! box; the SVG renderer wraps those in a single translated group.

use crate::LayoutOptions;
use crate::model::{
    Bounds, ChartLayout, LayoutPoint, LegendItemLayout, LegendLayout, PointLayout,
    ReferenceBarLayout, SegmentLayout, TextLayout, TrajectoryLayout,
};
use crate::opacity::opacity_hints;
use crate::text::{TextMeasurer, TextStyle};
use crate::tooltip::point_tooltip;
use boutline_core::{AlignedChart, Trajectory};

pub const LINE_STROKE_WIDTH: f64 = 2.0;
pub const APPROACH_STROKE_WIDTH: f64 = 4.0;
pub const FIRST_FIGHT_STROKE_WIDTH: f64 = 3.0;
pub const LEGEND_ROW_HEIGHT: f64 = 24.0;
pub const LEGEND_MIN_WIDTH: f64 = 150.0;
pub const LEGEND_SWATCH_WIDTH: f64 = 22.0;

const TITLE_FILL: &str = "#ffd700";
const SUBTITLE_FILL: &str = "#cccccc";
const LABEL_FILL: &str = "#ffffff";

fn scale_linear(domain: (f64, f64), range: (f64, f64), v: f64) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if d1 == d0 {
        return r0;
    }
    let t = (v - d0) / (d1 - d0);
    r0 + t * (r1 - r0)
}

/// Reference label used when the options do not carry one: the last word of the full name.
fn default_label(reference: &str) -> String {
    reference
        .split_whitespace()
        .last()
        .unwrap_or(reference)
        .to_string()
}

fn text(text: impl Into<String>, x: f64, y: f64, font_size: f64, bold: bool, fill: &str) -> TextLayout {
    TextLayout {
        text: text.into(),
        x,
        y,
        font_size,
        bold,
        fill: fill.to_string(),
        opacity: 1.0,
    }
}

fn headings(label: &str, options: &LayoutOptions) -> Vec<TextLayout> {
    let x = options.margin.left;
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Facing the {label} Filter"));
    vec![
        text(title, x, 50.0, 24.0, true, TITLE_FILL),
        text(
            "Each line represents a fighter's cumulative record, win = +1, loss = -1, draw = 0",
            x,
            75.0,
            16.0,
            false,
            SUBTITLE_FILL,
        ),
        text(
            format!("The vertical bar represents their fight with {label}"),
            x,
            95.0,
            16.0,
            false,
            SUBTITLE_FILL,
        ),
    ]
}

/// Data-space extent of all points, y padded by `max(1, 0.1 * range)`.
fn padded_domain(chart: &AlignedChart) -> Option<Bounds> {
    let raw = Bounds::from_points(
        chart
            .trajectories
            .iter()
            .flat_map(|t| t.points.iter().map(|p| (p.x, p.y))),
    )?;
    let pad = (0.1 * (raw.max_y - raw.min_y)).max(1.0);
    Some(Bounds {
        min_y: raw.min_y - pad,
        max_y: raw.max_y + pad,
        ..raw
    })
}

struct Scales {
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    width: f64,
    height: f64,
}

impl Scales {
    fn x(&self, v: f64) -> f64 {
        scale_linear(self.x_domain, (0.0, self.width), v)
    }

    fn y(&self, v: f64) -> f64 {
        scale_linear(self.y_domain, (self.height, 0.0), v)
    }

    fn point(&self, x: f64, y: f64) -> LayoutPoint {
        LayoutPoint {
            x: self.x(x),
            y: self.y(y),
        }
    }
}

fn layout_trajectory(t: &Trajectory, opacity_hint: f64, scales: &Scales) -> TrajectoryLayout {
    let points: Vec<PointLayout> = t
        .points
        .iter()
        .map(|p| PointLayout {
            x: scales.x(p.x),
            y: scales.y(p.y),
            is_reference_fight: p.is_reference_fight,
            tooltip: point_tooltip(t, p),
        })
        .collect();

    let approach_segment = t.approach_segment().map(|(a, b)| {
        let stroke_width = if t.reference_point_index() == Some(0) {
            FIRST_FIGHT_STROKE_WIDTH
        } else {
            APPROACH_STROKE_WIDTH
        };
        SegmentLayout {
            from: scales.point(t.points[a].x, t.points[a].y),
            to: scales.point(t.points[b].x, t.points[b].y),
            stroke_width,
        }
    });

    TrajectoryLayout {
        display_name: t.display_name.clone(),
        original_boxer_name: t.original_boxer_name.clone(),
        color: t.color.clone(),
        opacity_hint,
        stroke_width: LINE_STROKE_WIDTH,
        points,
        approach_segment,
    }
}

fn reference_bar(
    chart: &AlignedChart,
    label: &str,
    scales: &Scales,
    attribution: &[String],
) -> ReferenceBarLayout {
    let width = (scales.x(1.0) - scales.x(0.0)) * chart.x_spacing;
    let x = scales.x(chart.reference_x) - width;
    let text_x = x + width + 10.0;
    let height = scales.height;

    let mut labels = vec![
        TextLayout {
            opacity: 0.7,
            ..text(label, text_x, 15.0, 12.0, true, LABEL_FILL)
        },
        TextLayout {
            opacity: 0.7,
            ..text("Filter", text_x, 30.0, 12.0, true, LABEL_FILL)
        },
    ];

    // Attribution lines stack upward from 10px above the bottom, 15px apart.
    let n = attribution.len();
    for (i, line) in attribution.iter().enumerate() {
        let y = height - 10.0 - 15.0 * (n - 1 - i) as f64;
        labels.push(TextLayout {
            opacity: 0.2,
            ..text(line.clone(), text_x, y, 12.0, true, LABEL_FILL)
        });
    }

    ReferenceBarLayout {
        x,
        width,
        height,
        labels,
    }
}

fn legend(
    trajectories: &[TrajectoryLayout],
    inner_width: f64,
    measurer: &dyn TextMeasurer,
) -> LegendLayout {
    let style = TextStyle::default();
    let widest = trajectories
        .iter()
        .map(|t| measurer.measure(&t.display_name, &style).width)
        .fold(0.0, f64::max);
    let legend_width = LEGEND_MIN_WIDTH.max(LEGEND_SWATCH_WIDTH + widest + 8.0);

    let items = trajectories
        .iter()
        .rev()
        .enumerate()
        .map(|(i, t)| LegendItemLayout {
            label: t.display_name.clone(),
            color: t.color.clone(),
            y: i as f64 * LEGEND_ROW_HEIGHT,
        })
        .collect();

    LegendLayout {
        x: (inner_width - legend_width).max(10.0),
        y: 20.0,
        row_height: LEGEND_ROW_HEIGHT,
        items,
    }
}

pub(crate) fn layout_aligned_chart(chart: &AlignedChart, options: &LayoutOptions) -> ChartLayout {
    let margin = options.margin;
    let inner_width = options.viewport_width - margin.left - margin.right;
    let inner_height = options.viewport_height - margin.top - margin.bottom;
    let label = options
        .reference_label
        .clone()
        .unwrap_or_else(|| default_label(&chart.reference));

    let domain = padded_domain(chart);
    let hints = opacity_hints(chart.trajectories.len(), options.opacity_seed);

    let (trajectories, reference_bar) = match domain {
        Some(b) => {
            let scales = Scales {
                x_domain: (b.min_x, b.max_x),
                y_domain: (b.min_y, b.max_y),
                width: inner_width,
                height: inner_height,
            };
            let trajectories: Vec<TrajectoryLayout> = chart
                .trajectories
                .iter()
                .zip(hints)
                .map(|(t, hint)| layout_trajectory(t, hint, &scales))
                .collect();
            let bar = reference_bar(chart, &label, &scales, &options.attribution);
            (trajectories, Some(bar))
        }
        None => (Vec::new(), None),
    };

    let legend = legend(&trajectories, inner_width, options.text_measurer.as_ref());

    tracing::debug!(
        trajectories = trajectories.len(),
        inner_width,
        inner_height,
        "chart layout"
    );

    ChartLayout {
        width: options.viewport_width,
        height: options.viewport_height,
        margin,
        inner_width,
        inner_height,
        domain,
        reference: chart.reference.clone(),
        headings: headings(&label, options),
        trajectories,
        reference_bar,
        legend,
    }
}
