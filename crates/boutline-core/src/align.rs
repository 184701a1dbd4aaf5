//! Reference-opponent alignment.
//!
//! Every boxer who met the reference fighter gets one trajectory per such bout. Within a
//! trajectory the reference bout sits at a shared x coordinate and the y coordinate is the running
//! win/loss record, shifted so that the reference bouts of all trajectories are stacked in a
//! predictable vertical order (by date, or in evenly spaced slots).

use crate::bout::{BoxerRecord, Fight};
use crate::color::OrdinalColorScale;
use crate::config::ChartConfig;
use crate::date::date_to_epoch_ms;
use crate::index::ReferenceIndex;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// How the reference bouts are spread vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignMode {
    /// Evenly spaced slots centered on y = 0, in sort order.
    #[default]
    EqualSpacing,
    /// Occurrence date mapped through a linear time scale onto the configured band.
    Date,
}

impl FromStr for AlignMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equalspacing" | "equal-spacing" | "equal" => Ok(Self::EqualSpacing),
            "date" | "chronological" => Ok(Self::Date),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignOptions {
    pub reference: String,
    pub mode: AlignMode,
    pub order: SortOrder,
    /// Fight-index position every reference bout is shifted to (before `x_spacing`).
    pub reference_x: f64,
    /// Horizontal distance between consecutive fights.
    pub x_spacing: f64,
    /// Vertical distance between slots in [`AlignMode::EqualSpacing`].
    pub slot_spacing: f64,
    /// Output range of the time scale in [`AlignMode::Date`].
    pub date_band: (f64, f64),
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            reference: crate::config::DEFAULT_REFERENCE_FIGHTER.to_string(),
            mode: AlignMode::EqualSpacing,
            order: SortOrder::Ascending,
            reference_x: 15.0,
            x_spacing: 2.0,
            slot_spacing: 2.0,
            date_band: (-20.0, 20.0),
        }
    }
}

impl AlignOptions {
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let defaults = Self::default();

        let mode = match config.require_str("align.mode")? {
            None => defaults.mode,
            Some(s) => s.parse().map_err(|_| Error::InvalidConfig {
                path: "align.mode".to_string(),
                message: format!("unknown mode `{s}` (expected `equalSpacing` or `date`)"),
            })?,
        };
        let order = match config.require_str("align.order")? {
            None => defaults.order,
            Some(s) => s.parse().map_err(|_| Error::InvalidConfig {
                path: "align.order".to_string(),
                message: format!("unknown order `{s}` (expected `ascending` or `descending`)"),
            })?,
        };

        let date_band = match config.get("align.dateBand") {
            None => defaults.date_band,
            Some(v) => {
                let pair = v
                    .as_array()
                    .filter(|a| a.len() == 2)
                    .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)))
                    .filter(|(a, b)| a.is_finite() && b.is_finite());
                pair.ok_or_else(|| Error::InvalidConfig {
                    path: "align.dateBand".to_string(),
                    message: format!("expected [low, high], got {v}"),
                })?
            }
        };

        let x_spacing = config
            .require_f64("align.xSpacing")?
            .unwrap_or(defaults.x_spacing);
        if x_spacing <= 0.0 {
            return Err(Error::InvalidConfig {
                path: "align.xSpacing".to_string(),
                message: format!("must be positive, got {x_spacing}"),
            });
        }

        Ok(Self {
            reference: config.reference_name().to_string(),
            mode,
            order,
            reference_x: config
                .require_f64("align.referenceX")?
                .unwrap_or(defaults.reference_x),
            x_spacing,
            slot_spacing: config
                .require_f64("align.slotSpacing")?
                .unwrap_or(defaults.slot_spacing),
            date_band,
        })
    }

    /// Shared x coordinate of every reference bout.
    pub fn aligned_reference_x(&self) -> f64 {
        self.reference_x * self.x_spacing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub x: f64,
    /// Cumulative record after this fight.
    pub y: f64,
    pub source_fight: Option<Fight>,
    pub is_reference_fight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    /// Boxer name, suffixed with ` (k)` when the boxer met the reference more than once.
    pub display_name: String,
    pub original_boxer_name: String,
    /// 1-based ordinal of the reference bout this trajectory is anchored on.
    pub occurrence: u32,
    pub occurrence_date: Option<NaiveDate>,
    /// Net wins minus losses before the reference bout.
    pub record_at_reference: i64,
    pub target_y: f64,
    pub points: Vec<TrajectoryPoint>,
    pub color_key: String,
    pub color: String,
}

impl Trajectory {
    pub fn reference_point_index(&self) -> Option<usize> {
        self.points.iter().position(|p| p.is_reference_fight)
    }

    /// Point indices of the highlighted segment: the one leading into the reference bout, or the
    /// one leaving it when the reference bout is the boxer's first fight.
    pub fn approach_segment(&self) -> Option<(usize, usize)> {
        let idx = self.reference_point_index()?;
        if idx > 0 {
            Some((idx - 1, idx))
        } else if self.points.len() > 1 {
            Some((0, 1))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedChart {
    pub reference: String,
    pub mode: AlignMode,
    pub order: SortOrder,
    /// Shared x coordinate of the reference bouts.
    pub reference_x: f64,
    /// Horizontal distance between consecutive fights.
    pub x_spacing: f64,
    pub trajectories: Vec<Trajectory>,
}

#[derive(Debug, Clone)]
struct Occurrence<'a> {
    boxer: &'a BoxerRecord,
    fight_index: usize,
    ordinal: u32,
    total: usize,
    record_at_reference: i64,
    date: Option<NaiveDate>,
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn equal_spacing_targets(n: usize, step: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let base = -((n - 1) as f64 * step) / 2.0;
    (0..n).map(|k| base + k as f64 * step).collect()
}

fn date_targets(dates: &[Option<NaiveDate>], band: (f64, f64)) -> Vec<f64> {
    let (r0, r1) = band;
    let mid = (r0 + r1) / 2.0;
    let ms: Vec<Option<i64>> = dates.iter().map(|d| d.map(date_to_epoch_ms)).collect();
    let min = ms.iter().flatten().min().copied();
    let max = ms.iter().flatten().max().copied();

    ms.iter()
        .map(|v| match (v, min, max) {
            (Some(v), Some(lo), Some(hi)) if hi > lo => {
                let t = (v - lo) as f64 / (hi - lo) as f64;
                r0 + t * (r1 - r0)
            }
            // Degenerate domains and undated bouts sit at the band midpoint.
            _ => mid,
        })
        .collect()
}

/// Aligns every boxer's career on their bouts against `options.reference`.
///
/// Fails with [`Error::MissingReference`] when the reference fighter has no record of their own
/// in `boxers`, and with [`Error::DuplicateBoxer`] when two records share a name. Boxers who
/// never met the reference are dropped silently.
pub fn align(boxers: &[BoxerRecord], options: &AlignOptions) -> Result<AlignedChart> {
    let index = ReferenceIndex::build(boxers, &options.reference)?;
    if !index.reference_present() {
        tracing::error!(reference = %options.reference, "reference fighter data not found");
        return Err(Error::MissingReference {
            name: options.reference.clone(),
        });
    }

    let mut colors = OrdinalColorScale::default();
    for name in index.boxers() {
        colors.color_for(name);
    }

    let mut occurrences: Vec<Occurrence<'_>> = Vec::new();
    for boxer in boxers {
        let hits = index.occurrences(&boxer.name);
        for (k, &fight_index) in hits.iter().enumerate() {
            occurrences.push(Occurrence {
                boxer,
                fight_index,
                ordinal: k as u32 + 1,
                total: hits.len(),
                record_at_reference: boxer.record_before(fight_index),
                date: boxer.fights[fight_index].date,
            });
        }
    }

    occurrences.sort_by(|a, b| compare_dates(a.date, b.date, options.order));

    let targets = match options.mode {
        AlignMode::EqualSpacing => equal_spacing_targets(occurrences.len(), options.slot_spacing),
        AlignMode::Date => {
            let dates: Vec<Option<NaiveDate>> = occurrences.iter().map(|o| o.date).collect();
            date_targets(&dates, options.date_band)
        }
    };

    let trajectories: Vec<Trajectory> = occurrences
        .iter()
        .zip(targets)
        .map(|(occ, target_y)| build_trajectory(occ, target_y, options, &mut colors))
        .collect();

    tracing::info!(
        reference = %options.reference,
        boxers = index.len(),
        trajectories = trajectories.len(),
        "aligned trajectories"
    );

    Ok(AlignedChart {
        reference: options.reference.clone(),
        mode: options.mode,
        order: options.order,
        reference_x: options.aligned_reference_x(),
        x_spacing: options.x_spacing,
        trajectories,
    })
}

fn build_trajectory(
    occ: &Occurrence<'_>,
    target_y: f64,
    options: &AlignOptions,
    colors: &mut OrdinalColorScale,
) -> Trajectory {
    let name = &occ.boxer.name;
    let display_name = if occ.total > 1 {
        format!("{name} ({})", occ.ordinal)
    } else {
        name.clone()
    };

    let mut cumulative = target_y - occ.record_at_reference as f64;
    let shift = options.reference_x - occ.fight_index as f64;
    let points = occ
        .boxer
        .fights
        .iter()
        .enumerate()
        .map(|(j, fight)| {
            cumulative += fight.result.delta() as f64;
            TrajectoryPoint {
                x: (j as f64 + shift) * options.x_spacing,
                y: cumulative,
                source_fight: Some(fight.clone()),
                is_reference_fight: j == occ.fight_index,
            }
        })
        .collect();

    Trajectory {
        display_name,
        original_boxer_name: name.clone(),
        occurrence: occ.ordinal,
        occurrence_date: occ.date,
        record_at_reference: occ.record_at_reference,
        target_y,
        points,
        color_key: name.clone(),
        color: colors.color_for(name),
    }
}
