use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::key_record::KeyRecord;

/// Per-operation result reported by an `Applier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Success,
    Failure(String),
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Everything the applier did with a plan, item by item.
///
/// A report with failures is a partial success, not an error: the next
/// run re-diffs from scratch and picks up whatever was left behind.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub added: Vec<(KeyRecord, ApplyOutcome)>,
    pub deleted: Vec<(InventoryEntry, ApplyOutcome)>,
}

impl ApplyReport {
    /// Fingerprints of keys that were actually registered by this run.
    pub fn added_fingerprints(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .filter(|(_, outcome)| outcome.is_success())
            .map(|(record, _)| record.fingerprint.as_str())
    }

    pub fn failure_count(&self) -> usize {
        self.added
            .iter()
            .map(|(_, o)| o)
            .chain(self.deleted.iter().map(|(_, o)| o))
            .filter(|o| !o.is_success())
            .count()
    }
}
