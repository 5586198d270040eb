use std::collections::HashSet;

use serde::Deserialize;

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::key_record::KeyRecord;
use crate::core::models::rendered_template::RenderedTemplate;

/// The `[bootstrap]` section of keywarden.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Accounts that receive the authorized keys.
    #[serde(default = "default_user_accounts")]
    pub user_accounts: Vec<String>,
    /// Custom authorized-keys file path. When unset, keys are embedded
    /// inline per account and cloud-init uses its default location.
    #[serde(default)]
    pub ssh_authorized_keys_path: Option<String>,
    /// Verbatim cloud-config block appended to the document.
    #[serde(default)]
    pub extra_directives: Option<String>,
    /// Whether a template with zero keys may be rendered.
    #[serde(default = "default_allow_empty")]
    pub allow_empty: bool,
}

fn default_user_accounts() -> Vec<String> {
    vec!["admin".to_string()]
}

fn default_allow_empty() -> bool {
    true
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            user_accounts: default_user_accounts(),
            ssh_authorized_keys_path: None,
            extra_directives: None,
            allow_empty: default_allow_empty(),
        }
    }
}

/// Renders the cloud-init bootstrap document from the effective key set.
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Render a `#cloud-config` document embedding `effective_keys`.
    ///
    /// Key materials appear one per line, in input order, deduped by
    /// fingerprint a second time defensively. The output is a pure
    /// function of the inputs: no timestamps, no environment reads, so
    /// identical inputs render byte-identical documents.
    pub fn render(
        &self,
        effective_keys: &[KeyRecord],
        config: &BootstrapConfig,
    ) -> Result<RenderedTemplate> {
        if effective_keys.is_empty() && !config.allow_empty {
            return Err(KeywardenError::TemplateRender {
                reason: "effective key set is empty and [bootstrap] allow_empty is false".into(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let materials: Vec<&str> = effective_keys
            .iter()
            .filter(|k| seen.insert(k.fingerprint.as_str()))
            .map(|k| k.material.as_str())
            .collect();

        let mut body = String::from("#cloud-config\n");

        body.push_str("users:\n");
        for account in &config.user_accounts {
            body.push_str(&format!("  - name: {account}\n"));
            if config.ssh_authorized_keys_path.is_none() {
                if materials.is_empty() {
                    body.push_str("    ssh_authorized_keys: []\n");
                } else {
                    body.push_str("    ssh_authorized_keys:\n");
                    for material in &materials {
                        body.push_str(&format!("      - {material}\n"));
                    }
                }
            }
        }

        if let Some(ref path) = config.ssh_authorized_keys_path {
            body.push_str("write_files:\n");
            body.push_str(&format!("  - path: {path}\n"));
            body.push_str("    permissions: \"0600\"\n");
            if materials.is_empty() {
                body.push_str("    content: \"\"\n");
            } else {
                body.push_str("    content: |\n");
                for material in &materials {
                    body.push_str(&format!("      {material}\n"));
                }
            }
        }

        if let Some(ref extra) = config.extra_directives {
            let trimmed = extra.trim_end();
            if !trimmed.is_empty() {
                body.push_str(trimmed);
                body.push('\n');
            }
        }

        Ok(RenderedTemplate::new(body))
    }
}
