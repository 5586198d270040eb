use std::collections::HashSet;

use crate::core::models::key_record::KeyRecord;

/// A key that could not be parsed into a stable fingerprint and was
/// excluded from the desired set. Surfaced to the caller as a warning,
/// never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedKey {
    pub name: String,
    pub reason: String,
}

/// The ordered, deduplicated set of keys the source wants registered.
///
/// Duplicate fingerprints keep the first occurrence; later ones are
/// dropped without error. Malformed entries land in `rejected`.
#[derive(Debug, Clone, Default)]
pub struct DesiredKeySet {
    pub keys: Vec<KeyRecord>,
    pub rejected: Vec<RejectedKey>,
}

impl DesiredKeySet {
    /// Build a set from records in source order, first-wins on fingerprint.
    pub fn from_records(records: Vec<KeyRecord>, rejected: Vec<RejectedKey>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let keys = records
            .into_iter()
            .filter(|r| seen.insert(r.fingerprint.clone()))
            .collect();
        Self { keys, rejected }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
