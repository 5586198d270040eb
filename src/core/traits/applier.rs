use crate::core::models::apply_report::ApplyOutcome;
use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::key_record::KeyRecord;

/// Port for executing plan operations against the provider.
///
/// Per-item failures are outcomes, not errors: the core never retries,
/// and the next run's diff self-heals whatever was left behind. Retry
/// and backoff policy belongs to the implementation.
pub trait Applier: Send + Sync {
    /// Register a new key pair.
    fn create_key_pair(&self, record: &KeyRecord) -> ApplyOutcome;

    /// Remove a registered key pair.
    fn delete_key_pair(&self, entry: &InventoryEntry) -> ApplyOutcome;
}
