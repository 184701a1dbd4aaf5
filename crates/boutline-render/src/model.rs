use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 80.0,
            right: 10.0,
            bottom: 60.0,
            left: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Pixel-space point plus its hover text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLayout {
    pub x: f64,
    pub y: f64,
    pub is_reference_fight: bool,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentLayout {
    pub from: LayoutPoint,
    pub to: LayoutPoint,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryLayout {
    pub display_name: String,
    pub original_boxer_name: String,
    pub color: String,
    /// Resting opacity of the full career line.
    pub opacity_hint: f64,
    pub stroke_width: f64,
    pub points: Vec<PointLayout>,
    pub approach_segment: Option<SegmentLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub bold: bool,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBarLayout {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub labels: Vec<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItemLayout {
    pub label: String,
    pub color: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub row_height: f64,
    pub items: Vec<LegendItemLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Full SVG canvas size.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Plot area size (canvas minus margins).
    pub inner_width: f64,
    pub inner_height: f64,
    /// Data-space extent shown in the plot area (y already padded).
    pub domain: Option<Bounds>,
    pub reference: String,
    pub headings: Vec<TextLayout>,
    pub trajectories: Vec<TrajectoryLayout>,
    pub reference_bar: Option<ReferenceBarLayout>,
    pub legend: LegendLayout,
}
