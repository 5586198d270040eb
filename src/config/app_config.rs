use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{KeywardenError, Result};
use crate::core::services::template_generator::BootstrapConfig;

/// Top-level Keywarden configuration read from `keywarden.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: SourceSection,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub publish: PublishSection,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Load and validate the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KeywardenError::InvalidConfig {
                detail: format!(
                    "{} not found. Run 'keywarden init' first.",
                    path.display()
                ),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| KeywardenError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match (&self.source.contents_url, &self.source.dir) {
            (None, None) => Err(KeywardenError::InvalidConfig {
                detail: "[source] needs either contents_url (GitHub) or dir (local)".into(),
            }),
            (Some(_), Some(_)) => Err(KeywardenError::InvalidConfig {
                detail: "[source] contents_url and dir are mutually exclusive".into(),
            }),
            _ => {
                if self.provider.managed_suffix.is_empty() {
                    return Err(KeywardenError::InvalidConfig {
                        detail: "[provider] managed_suffix must not be empty; without it \
                                 every provider key pair would be treated as managed"
                            .into(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// The `[source]` section: where the desired keys live.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    /// GitHub contents API URL for the directory of public-key files.
    pub contents_url: Option<String>,
    /// Env var holding the GitHub API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Local directory of `*.pub` files (offline / testing path).
    pub dir: Option<String>,
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

/// The `[provider]` section: how the key-pair registry is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSection {
    /// JSON registry file standing in for the provider key-pair API.
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    /// Suffix marking key pairs owned by keywarden. Entries without it
    /// are never touched.
    #[serde(default = "default_managed_suffix")]
    pub managed_suffix: String,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            registry_file: default_registry_file(),
            managed_suffix: default_managed_suffix(),
        }
    }
}

fn default_registry_file() -> String {
    ".keywarden/registry.json".to_string()
}

fn default_managed_suffix() -> String {
    "-gh-key".to_string()
}

/// The `[publish]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishSection {
    /// Where the rendered template is stored.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

fn default_location() -> String {
    "out/cloud-init.yaml".to_string()
}
