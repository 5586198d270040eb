use std::path::{Path, PathBuf};

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::apply_report::ApplyOutcome;
use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::applier::Applier;
use crate::core::traits::provider_inventory::ProviderInventory;

/// File-backed key-pair registry: a JSON array of `{name, fingerprint}`.
///
/// Stands in for the compute provider's key-pair API in local and test
/// runs, implementing both the inventory (read) and applier (write)
/// ports. A real cloud binding implements the same two traits.
///
/// Entry order in the file is the provider's stable listing order.
#[derive(Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Create a registry backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<InventoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| KeywardenError::ProviderUnavailable {
                reason: format!("cannot read {}: {e}", self.path.display()),
            })?;
        serde_json::from_str(&content).map_err(|e| KeywardenError::ProviderUnavailable {
            reason: format!("registry {} is corrupt: {e}", self.path.display()),
        })
    }

    fn write_entries(&self, entries: &[InventoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            KeywardenError::ProviderUnavailable {
                reason: format!("cannot serialize registry: {e}"),
            }
        })?;
        std::fs::write(&self.path, json + "\n")?;
        Ok(())
    }
}

impl ProviderInventory for FileProvider {
    fn list_key_pairs(&self) -> Result<Vec<InventoryEntry>> {
        self.read_entries()
    }
}

impl Applier for FileProvider {
    fn create_key_pair(&self, record: &KeyRecord) -> ApplyOutcome {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => return ApplyOutcome::Failure(e.to_string()),
        };

        // Duplicate fingerprints are a skip, not a failure, mirroring
        // provider "already exists" responses.
        if entries.iter().any(|e| e.fingerprint == record.fingerprint) {
            return ApplyOutcome::Success;
        }

        entries.push(InventoryEntry {
            name: record.name.clone(),
            fingerprint: record.fingerprint.clone(),
        });

        match self.write_entries(&entries) {
            Ok(()) => ApplyOutcome::Success,
            Err(e) => ApplyOutcome::Failure(e.to_string()),
        }
    }

    fn delete_key_pair(&self, entry: &InventoryEntry) -> ApplyOutcome {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => return ApplyOutcome::Failure(e.to_string()),
        };

        let remaining: Vec<InventoryEntry> = entries
            .into_iter()
            .filter(|e| e.fingerprint != entry.fingerprint)
            .collect();

        match self.write_entries(&remaining) {
            Ok(()) => ApplyOutcome::Success,
            Err(e) => ApplyOutcome::Failure(e.to_string()),
        }
    }
}
