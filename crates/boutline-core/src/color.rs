use rustc_hash::FxHashMap;

/// The ten-color category palette (d3 `schemeCategory10`).
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal color scale: the first lookup of a key claims the next palette slot, later lookups of
/// the same key return the same color. Wraps around after the palette is exhausted.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: Vec<String>,
    domain: FxHashMap<String, usize>,
}

impl Default for OrdinalColorScale {
    fn default() -> Self {
        Self::new(CATEGORY10.iter().map(|c| c.to_string()).collect())
    }
}

impl OrdinalColorScale {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            domain: FxHashMap::default(),
        }
    }

    pub fn color_for(&mut self, key: &str) -> String {
        let idx = match self.domain.get(key).copied() {
            Some(idx) => idx,
            None => {
                let idx = self.domain.len();
                self.domain.insert(key.to_string(), idx);
                idx
            }
        };
        if self.palette.is_empty() {
            return String::new();
        }
        self.palette[idx % self.palette.len()].clone()
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
