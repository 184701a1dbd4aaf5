//! Hover state as data.
//!
//! A single [`Selection`] value describes what the pointer is over; the style functions below
//! derive every affected attribute from it. Renderers call them for each element instead of
//! patching styles from per-element callbacks.

use crate::model::TrajectoryLayout;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "displayName", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    /// A legend row (and its line) is hovered, keyed by trajectory display name.
    Trajectory(String),
}

impl Selection {
    pub fn trajectory(display_name: impl Into<String>) -> Self {
        Self::Trajectory(display_name.into())
    }

    pub fn trajectory_name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Trajectory(name) => Some(name.as_str()),
        }
    }

    pub fn is_selected(&self, display_name: &str) -> bool {
        matches!(self, Self::Trajectory(name) if name == display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub opacity: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendStyle {
    pub underline: bool,
}

/// Career-line style: the selected line is fully opaque, all others keep their hint.
pub fn line_style(trajectory: &TrajectoryLayout, selection: &Selection) -> LineStyle {
    let opacity = if selection.is_selected(&trajectory.display_name) {
        1.0
    } else {
        trajectory.opacity_hint
    };
    LineStyle {
        opacity,
        stroke_width: trajectory.stroke_width,
    }
}

pub fn legend_style(display_name: &str, selection: &Selection) -> LegendStyle {
    LegendStyle {
        underline: selection.is_selected(display_name),
    }
}
