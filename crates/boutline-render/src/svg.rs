//! Standalone SVG serialization of a [`ChartLayout`].

mod util;

use crate::Result;
use crate::model::{
    ChartLayout, LegendLayout, PointLayout, ReferenceBarLayout, TextLayout, TrajectoryLayout,
};
use crate::selection::{Selection, legend_style, line_style};
use std::fmt::Write as _;
use util::{escape_attr, escape_xml, fmt, fmt_path};

pub use util::DEFAULT_BACKGROUND;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id` attribute; also prefixes element ids.
    pub diagram_id: Option<String>,
    /// CSS background color of the root element. `None` leaves it transparent.
    pub background: Option<String>,
    /// Radius of the invisible hover targets carrying point tooltips. Zero omits them.
    pub point_radius: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: Some(DEFAULT_BACKGROUND.to_string()),
            point_radius: 4.0,
        }
    }
}

fn polyline_d(points: impl IntoIterator<Item = (f64, f64)>) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(&mut d, "{cmd}{},{}", fmt_path(x), fmt_path(y));
    }
    d
}

fn write_text(out: &mut String, t: &TextLayout) {
    let weight = if t.bold { " font-weight: bold;" } else { "" };
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" style="font-size: {size}px;{weight} fill: {fill}; opacity: {opacity};">{text}</text>"#,
        x = fmt(t.x),
        y = fmt(t.y),
        size = fmt(t.font_size),
        weight = weight,
        fill = escape_attr(&t.fill),
        opacity = fmt(t.opacity),
        text = escape_xml(&t.text),
    );
}

fn write_points(out: &mut String, points: &[PointLayout], radius: f64) {
    if radius <= 0.0 || points.is_empty() {
        return;
    }
    out.push_str(r#"<g class="points">"#);
    for p in points {
        let class = if p.is_reference_fight {
            "point reference-fight"
        } else {
            "point"
        };
        let _ = write!(
            out,
            r#"<circle class="{class}" cx="{cx}" cy="{cy}" r="{r}" style="fill: transparent;"><title>{tip}</title></circle>"#,
            class = class,
            cx = fmt(p.x),
            cy = fmt(p.y),
            r = fmt(radius),
            tip = escape_xml(&p.tooltip),
        );
    }
    out.push_str("</g>");
}

fn write_trajectory(
    out: &mut String,
    t: &TrajectoryLayout,
    selection: &Selection,
    options: &SvgRenderOptions,
) {
    let style = line_style(t, selection);
    let selected = if selection.is_selected(&t.display_name) {
        r#" data-selected="true""#
    } else {
        ""
    };
    let _ = write!(
        out,
        r#"<g class="trajectory" data-boxer="{name}"{selected}>"#,
        name = escape_attr(&t.display_name),
        selected = selected,
    );
    let _ = write!(
        out,
        r#"<path class="line" d="{d}" style="fill: none; stroke: white; stroke-width: {w}; opacity: {o};"/>"#,
        d = polyline_d(t.points.iter().map(|p| (p.x, p.y))),
        w = fmt(style.stroke_width),
        o = fmt(style.opacity),
    );
    if let Some(seg) = t.approach_segment.as_ref() {
        let _ = write!(
            out,
            r#"<path class="approach-segment" d="{d}" style="fill: none; stroke: {color}; stroke-width: {w}; opacity: 1;"/>"#,
            d = polyline_d([(seg.from.x, seg.from.y), (seg.to.x, seg.to.y)]),
            color = escape_attr(&t.color),
            w = fmt(seg.stroke_width),
        );
    }
    write_points(out, &t.points, options.point_radius);
    out.push_str("</g>");
}

fn write_reference_bar(out: &mut String, bar: &ReferenceBarLayout) {
    out.push_str(r#"<g class="reference-bar">"#);
    let _ = write!(
        out,
        r#"<rect x="{x}" y="0" width="{w}" height="{h}" style="fill: white; opacity: 0.2; mix-blend-mode: color-dodge;"/>"#,
        x = fmt(bar.x),
        w = fmt(bar.width),
        h = fmt(bar.height),
    );
    for label in &bar.labels {
        write_text(out, label);
    }
    out.push_str("</g>");
}

fn write_legend(out: &mut String, legend: &LegendLayout, selection: &Selection) {
    let _ = write!(
        out,
        r#"<g class="legend" transform="translate({x}, {y})">"#,
        x = fmt(legend.x),
        y = fmt(legend.y),
    );
    for item in &legend.items {
        let decoration = if legend_style(&item.label, selection).underline {
            "underline"
        } else {
            "none"
        };
        let _ = write!(
            out,
            r#"<g class="legend-row" transform="translate(0, {y})" style="cursor: pointer;"><line x1="0" y1="3" x2="18" y2="15" style="stroke: {color}; stroke-width: 4; opacity: 1;"/><text x="22" y="9" dy="0.35em" style="fill: #ffffff; font-size: 12px; opacity: 0.7; text-decoration: {decoration};">{label}</text></g>"#,
            y = fmt(item.y),
            color = escape_attr(&item.color),
            decoration = decoration,
            label = escape_xml(&item.label),
        );
    }
    out.push_str("</g>");
}

/// Serializes `layout` to a standalone SVG document, styled for `selection`.
pub fn render_chart_svg(
    layout: &ChartLayout,
    options: &SvgRenderOptions,
    selection: &Selection,
) -> Result<String> {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("boutline");
    let diagram_id_esc = escape_xml(diagram_id);
    let background = options
        .background
        .as_deref()
        .map(|bg| format!(" background-color: {};", escape_attr(bg)))
        .unwrap_or_default();

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" style="font-family: sans-serif;{background}" role="graphics-document document" aria-roledescription="boutline">"#,
        id = diagram_id_esc,
        w = fmt(layout.width),
        h = fmt(layout.height),
        background = background,
    );
    let _ = write!(
        &mut out,
        r#"<title id="chart-title-{id}">{title}</title>"#,
        id = diagram_id_esc,
        title = escape_xml(
            layout
                .headings
                .first()
                .map(|t| t.text.as_str())
                .unwrap_or(layout.reference.as_str())
        ),
    );

    out.push_str(r#"<g class="headings">"#);
    for heading in &layout.headings {
        write_text(&mut out, heading);
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<g class="plot" transform="translate({x},{y})">"#,
        x = fmt(layout.margin.left),
        y = fmt(layout.margin.top),
    );
    out.push_str(r#"<g class="trajectories">"#);
    for t in &layout.trajectories {
        write_trajectory(&mut out, t, selection, options);
    }
    out.push_str("</g>");
    if let Some(bar) = layout.reference_bar.as_ref() {
        write_reference_bar(&mut out, bar);
    }
    write_legend(&mut out, &layout.legend, selection);
    out.push_str("</g></svg>\n");

    tracing::debug!(
        bytes = out.len(),
        selected = ?selection.trajectory_name(),
        "rendered chart svg"
    );
    Ok(out)
}
