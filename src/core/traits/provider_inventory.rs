use crate::core::errors::Result;
use crate::core::models::inventory_entry::InventoryEntry;

/// Port for reading the key pairs currently registered with the
/// compute provider.
pub trait ProviderInventory: Send + Sync {
    /// List all registered key pairs, in the provider's stable order.
    fn list_key_pairs(&self) -> Result<Vec<InventoryEntry>>;
}
