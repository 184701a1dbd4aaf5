use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of a bout from the recorded boxer's perspective.
///
/// Codes the loader does not recognize (e.g. `NC`) are kept verbatim so they can still be shown
/// in tooltips; they never move the cumulative record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FightResult {
    Win,
    Loss,
    Draw,
    Unrecognized(String),
}

impl FightResult {
    /// Accepts both long and short forms (`Win`/`W`, `Loss`/`L`, `Draw`/`D`), case-insensitively.
    pub fn parse(code: &str) -> Self {
        let t = code.trim();
        match t.to_ascii_lowercase().as_str() {
            "win" | "w" => Self::Win,
            "loss" | "l" => Self::Loss,
            "draw" | "d" => Self::Draw,
            _ => Self::Unrecognized(t.to_string()),
        }
    }

    /// Contribution to the cumulative record: +1, -1 or 0.
    pub fn delta(&self) -> i64 {
        match self {
            Self::Win => 1,
            Self::Loss => -1,
            Self::Draw | Self::Unrecognized(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Draw => "Draw",
            Self::Unrecognized(code) => code.as_str(),
        }
    }
}

impl std::fmt::Display for FightResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FightResult> for String {
    fn from(value: FightResult) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for FightResult {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub opponent: String,
    pub result: FightResult,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    /// 1-based position in the boxer's chronological fight list.
    pub sequence_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxerRecord {
    pub name: String,
    pub fights: Vec<Fight>,
}

impl BoxerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fights: Vec::new(),
        }
    }

    /// Stable chronological sort (undated bouts keep their relative order after dated ones),
    /// followed by renumbering `sequence_number` from 1.
    pub fn sort_chronologically(&mut self) {
        self.fights.sort_by_key(|f| (f.date.is_none(), f.date));
        for (idx, fight) in self.fights.iter_mut().enumerate() {
            fight.sequence_number = idx as u32 + 1;
        }
    }

    /// Net wins minus losses over `fights[..end]`.
    pub fn record_before(&self, end: usize) -> i64 {
        self.fights
            .iter()
            .take(end)
            .map(|f| f.result.delta())
            .sum()
    }
}
