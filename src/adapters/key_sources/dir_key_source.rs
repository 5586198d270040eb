use std::path::PathBuf;

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::desired_key_set::{DesiredKeySet, RejectedKey};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::key_source::KeySource;

/// Key source backed by a local directory of `*.pub` files.
///
/// One file per user; the key-pair name is the file stem plus the
/// managed suffix (`alice.pub` → `alice-gh-key`). Files are read in
/// lexicographic order so the desired set is deterministic.
///
/// This is the offline/local-invocation path; it produces the same
/// `DesiredKeySet` shape as the GitHub source.
pub struct DirKeySource {
    dir: PathBuf,
    managed_suffix: String,
}

impl DirKeySource {
    pub fn new(dir: PathBuf, managed_suffix: &str) -> Self {
        Self {
            dir,
            managed_suffix: managed_suffix.to_string(),
        }
    }
}

impl KeySource for DirKeySource {
    fn fetch_desired_keys(&self) -> Result<DesiredKeySet> {
        if !self.dir.is_dir() {
            return Err(KeywardenError::SourceUnavailable {
                reason: format!("key directory {} does not exist", self.dir.display()),
            });
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .map_err(|e| KeywardenError::SourceUnavailable {
                reason: format!("cannot read {}: {e}", self.dir.display()),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "pub"))
            .collect();
        paths.sort();

        let mut records = Vec::new();
        let mut rejected = Vec::new();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = format!("{stem}{}", self.managed_suffix);
            let raw = std::fs::read_to_string(&path)?;

            match KeyRecord::parse(&name, &raw) {
                Ok(record) => records.push(record),
                Err(KeywardenError::MalformedKey { name, detail }) => {
                    rejected.push(RejectedKey {
                        name,
                        reason: detail,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(DesiredKeySet::from_records(records, rejected))
    }
}
