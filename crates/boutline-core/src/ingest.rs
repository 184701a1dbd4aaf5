//! CSV bout-record loader.
//!
//! Expected header: `Opponent 1,Opponent 2,Result,Method,Date`. Each row is one bout seen from
//! `Opponent 1`'s side, so a boxer's record is the set of rows naming them in the first column.

use crate::bout::{BoxerRecord, Fight, FightResult};
use crate::date::parse_bout_date;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const COLUMN_BOXER: &str = "Opponent 1";
pub const COLUMN_OPPONENT: &str = "Opponent 2";
pub const COLUMN_RESULT: &str = "Result";
pub const COLUMN_METHOD: &str = "Method";
pub const COLUMN_DATE: &str = "Date";

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub total_rows: u32,
    pub accepted: u32,
    pub skipped: u32,
    pub undated: u32,
}

/// Parsed bout records, boxers in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub boxers: Vec<BoxerRecord>,
    pub stats: IngestStats,
}

impl Dataset {
    pub fn from_records(boxers: Vec<BoxerRecord>) -> Self {
        Self {
            boxers,
            stats: IngestStats::default(),
        }
    }

    pub fn boxer(&self, name: &str) -> Option<&BoxerRecord> {
        self.boxers.iter().find(|b| b.name == name)
    }
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    boxer: usize,
    opponent: usize,
    result: usize,
    method: Option<usize>,
    date: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
            })
        };
        Ok(Self {
            boxer: required(COLUMN_BOXER)?,
            opponent: required(COLUMN_OPPONENT)?,
            result: required(COLUMN_RESULT)?,
            method: find(COLUMN_METHOD),
            date: find(COLUMN_DATE),
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: Option<usize>) -> Option<&'r str> {
    let v = record.get(idx?)?.trim();
    if v.is_empty() { None } else { Some(v) }
}

/// Parses CSV text into per-boxer chronological fight lists.
///
/// Rows lacking a boxer, opponent or result are skipped and counted; they never abort the batch.
/// A missing required header column or malformed CSV framing is an error.
pub fn load_bouts(text: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let columns = Columns::resolve(reader.headers()?)?;

    let mut by_boxer: IndexMap<String, BoxerRecord> = IndexMap::new();
    let mut stats = IngestStats::default();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        stats.total_rows += 1;

        let (Some(boxer), Some(opponent), Some(result)) = (
            field(&record, Some(columns.boxer)),
            field(&record, Some(columns.opponent)),
            field(&record, Some(columns.result)),
        ) else {
            stats.skipped += 1;
            tracing::debug!(row = row_idx + 2, "skipping bout row with missing fields");
            continue;
        };

        let raw_date = field(&record, columns.date);
        let date = raw_date.and_then(parse_bout_date);
        if date.is_none() {
            stats.undated += 1;
            if let Some(raw) = raw_date {
                tracing::debug!(row = row_idx + 2, date = raw, "unrecognized bout date");
            }
        }

        let entry = by_boxer
            .entry(boxer.to_string())
            .or_insert_with(|| BoxerRecord::new(boxer));
        let sequence_number = entry.fights.len() as u32 + 1;
        entry.fights.push(Fight {
            opponent: opponent.to_string(),
            result: FightResult::parse(result),
            date,
            method: field(&record, columns.method).map(str::to_string),
            sequence_number,
        });
        stats.accepted += 1;
    }

    let mut boxers: Vec<BoxerRecord> = by_boxer.into_values().collect();
    for boxer in &mut boxers {
        boxer.sort_chronologically();
    }

    tracing::info!(
        boxers = boxers.len(),
        accepted = stats.accepted,
        skipped = stats.skipped,
        "loaded bout records"
    );

    Ok(Dataset { boxers, stats })
}
