use std::collections::HashSet;

use crate::core::models::desired_key_set::DesiredKeySet;
use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::plan::ReconciliationPlan;

/// Diffs the desired key set against the provider inventory.
pub struct Reconciler;

impl Reconciler {
    /// Compute the minimal add/delete plan that converges `current`
    /// onto `desired`.
    ///
    /// - Desired keys whose fingerprint is absent from the inventory
    ///   are added, in desired order.
    /// - Inventory entries whose fingerprint is absent from the desired
    ///   set are deleted, in inventory order (never re-sorted).
    /// - A fingerprint present on both sides is a no-op, even when the
    ///   names differ (same key under a different name is not a rename).
    ///
    /// Pure: inputs are untouched and the output is deterministic.
    /// Reapplying against the post-plan inventory yields an empty plan.
    pub fn reconcile(
        &self,
        desired: &DesiredKeySet,
        current: &[InventoryEntry],
    ) -> ReconciliationPlan {
        let desired_fps: HashSet<&str> =
            desired.keys.iter().map(|k| k.fingerprint.as_str()).collect();
        let current_fps: HashSet<&str> =
            current.iter().map(|e| e.fingerprint.as_str()).collect();

        let to_add = desired
            .keys
            .iter()
            .filter(|k| !current_fps.contains(k.fingerprint.as_str()))
            .cloned()
            .collect();

        let to_delete = current
            .iter()
            .filter(|e| !desired_fps.contains(e.fingerprint.as_str()))
            .cloned()
            .collect();

        ReconciliationPlan { to_add, to_delete }
    }
}
