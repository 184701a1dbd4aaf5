use crate::bout::BoxerRecord;
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Boxer name -> positions in that boxer's fight list where they met the reference fighter.
///
/// Built once per dataset. Boxers without such a bout, and the reference fighter's own record,
/// are absent. Iteration follows dataset order. Boxer names are unique keys: a dataset with two
/// records under one name is rejected with [`Error::DuplicateBoxer`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    reference: String,
    occurrences: IndexMap<String, Vec<usize>>,
    reference_present: bool,
}

impl ReferenceIndex {
    pub fn build(boxers: &[BoxerRecord], reference: &str) -> Result<Self> {
        let mut occurrences: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut reference_present = false;

        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for boxer in boxers {
            if !seen.insert(boxer.name.as_str()) {
                return Err(Error::DuplicateBoxer {
                    name: boxer.name.clone(),
                });
            }
            if boxer.name == reference {
                reference_present = true;
                continue;
            }
            let hits: Vec<usize> = boxer
                .fights
                .iter()
                .enumerate()
                .filter(|(_, f)| f.opponent == reference)
                .map(|(i, _)| i)
                .collect();
            if !hits.is_empty() {
                occurrences.insert(boxer.name.clone(), hits);
            }
        }

        Ok(Self {
            reference: reference.to_string(),
            occurrences,
            reference_present,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the reference fighter's own record was in the dataset.
    pub fn reference_present(&self) -> bool {
        self.reference_present
    }

    pub fn occurrences(&self, boxer: &str) -> &[usize] {
        self.occurrences
            .get(boxer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn fought_reference(&self, boxer: &str) -> bool {
        self.occurrences.contains_key(boxer)
    }

    pub fn boxers(&self) -> impl Iterator<Item = &str> {
        self.occurrences.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}
