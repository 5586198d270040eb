use crate::core::errors::Result;
use crate::core::models::desired_key_set::DesiredKeySet;

/// Port for reading the authoritative set of desired public keys.
///
/// Implementations live in `adapters::key_sources` (e.g. GithubKeySource,
/// DirKeySource). The core layer only depends on this trait, never on a
/// concrete source.
pub trait KeySource: Send + Sync {
    /// Fetch the desired key set, with malformed entries excluded into
    /// `DesiredKeySet::rejected` rather than failing the whole read.
    fn fetch_desired_keys(&self) -> Result<DesiredKeySet>;
}

impl<T: KeySource + ?Sized> KeySource for Box<T> {
    fn fetch_desired_keys(&self) -> Result<DesiredKeySet> {
        (**self).fetch_desired_keys()
    }
}
