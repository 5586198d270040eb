use std::sync::OnceLock;

use regex::Regex;
use ssh_key::{HashAlg, PublicKey};

use crate::core::errors::{KeywardenError, Result};

/// A named SSH public key from the desired set.
///
/// Two records are equal iff their fingerprints match; `name` is a
/// display/lookup label, not an identity guarantee.
#[derive(Debug, Clone)]
pub struct KeyRecord {
    /// Key-pair name registered with the provider (e.g. `alice-gh-key`).
    pub name: String,
    /// Normalized content-derived identifier (`SHA256:...`).
    pub fingerprint: String,
    /// Raw public-key blob in one-line OpenSSH format.
    pub material: String,
}

/// Provider key-pair naming constraints (printable ASCII subset, max 255).
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9@._-]{0,254}$").unwrap())
}

impl KeyRecord {
    /// Parse a raw key blob into a record with a stable fingerprint.
    ///
    /// The blob is normalized first: blank lines and `#` comment lines are
    /// dropped, surrounding whitespace is trimmed. Exactly one key line must
    /// remain. Fails with `MalformedKey` otherwise.
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        if !name_pattern().is_match(name) {
            return Err(KeywardenError::MalformedKey {
                name: name.to_string(),
                detail: "key-pair name contains characters the provider rejects".into(),
            });
        }

        let material = normalize_material(raw).ok_or_else(|| KeywardenError::MalformedKey {
            name: name.to_string(),
            detail: "expected exactly one public key line".into(),
        })?;

        let key = PublicKey::from_openssh(&material).map_err(|e| KeywardenError::MalformedKey {
            name: name.to_string(),
            detail: format!("not a valid OpenSSH public key: {e}"),
        })?;

        Ok(Self {
            name: name.to_string(),
            fingerprint: key.fingerprint(HashAlg::Sha256).to_string(),
            material,
        })
    }
}

/// Strip blank and comment lines; return the single remaining key line.
fn normalize_material(raw: &str) -> Option<String> {
    let mut lines = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let first = lines.next()?;
    if lines.next().is_some() {
        return None;
    }
    Some(first.to_string())
}

impl PartialEq for KeyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for KeyRecord {}

impl std::hash::Hash for KeyRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl std::fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.fingerprint)
    }
}
