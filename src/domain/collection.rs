use super::models::MatchId;
use std::collections::BTreeMap;

/// Per-match results indexed by match id, iterated in ascending id order
/// whatever order they were inserted in
#[derive(Debug)]
pub struct MatchIndex<T> {
    entries: BTreeMap<MatchId, T>,
}

impl<T> MatchIndex<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, match_id: MatchId, value: T) {
        self.entries.insert(match_id, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, match_id: MatchId) -> Option<&T> {
        self.entries.get(&match_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MatchId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn into_vec(self) -> Vec<(MatchId, T)> {
        self.entries.into_iter().collect()
    }
}

impl<T> Default for MatchIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
