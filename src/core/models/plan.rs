use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::key_record::KeyRecord;

/// The ordered add/delete operations that converge the provider
/// inventory onto the desired key set.
///
/// `to_add` and `to_delete` operate on disjoint fingerprint sets by
/// construction, so their execution order is immaterial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan {
    /// Keys in the desired set but not the inventory, in desired order.
    pub to_add: Vec<KeyRecord>,
    /// Entries in the inventory but not the desired set, in inventory order.
    pub to_delete: Vec<InventoryEntry>,
}

impl ReconciliationPlan {
    /// An empty plan means the inventory already matches the desired set.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }

    /// True when applying this plan would leave nothing of a non-empty
    /// inventory behind while adding no replacements.
    pub fn is_full_teardown(&self, inventory_len: usize) -> bool {
        inventory_len > 0 && self.to_add.is_empty() && self.to_delete.len() == inventory_len
    }
}
