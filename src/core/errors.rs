/// All domain errors for Keywarden.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum KeywardenError {
    #[error("Malformed public key '{name}': {detail}")]
    MalformedKey { name: String, detail: String },

    #[error(
        "Key source unavailable: {reason}\n\n  \
         The desired key set could not be read, so nothing was changed.\n\n  \
         Solutions:\n    \
         → Check [source] in keywarden.toml (contents_url or dir)\n    \
         → Check that the token env var is set and has read access\n    \
         → Retry once the source is reachable"
    )]
    SourceUnavailable { reason: String },

    #[error(
        "Provider inventory unavailable: {reason}\n\n  \
         The current key-pair inventory could not be read, so no plan was\n  \
         computed and nothing was changed."
    )]
    ProviderUnavailable { reason: String },

    #[error("Failed to publish template: {reason}")]
    Storage { reason: String },

    #[error("Template rendering failed: {reason}")]
    TemplateRender { reason: String },

    #[error(
        "Refusing to delete all {count} managed key pairs\n\n  \
         The desired key set is empty (or disjoint from the inventory), so this\n  \
         sync would tear down every managed key pair. This usually means the\n  \
         source read returned nothing by accident.\n\n  \
         If the teardown is intentional, re-run with --allow-teardown."
    )]
    TeardownRefused { count: usize },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeywardenError>;
