use std::path::Path;

use crate::cli::output;
use crate::core::errors::{KeywardenError, Result};

const CONFIG_TEMPLATE: &str = r#"[source]
# GitHub contents API URL for the directory of public-key files:
# contents_url = "https://api.github.com/repos/ORG/REPO/contents/keys"
# token_env = "GITHUB_TOKEN"
# Or a local directory of *.pub files:
dir = "keys"

[provider]
registry_file = ".keywarden/registry.json"
managed_suffix = "-gh-key"

[publish]
location = "out/cloud-init.yaml"

[bootstrap]
user_accounts = ["admin"]
# ssh_authorized_keys_path = "/etc/ssh/extra_authorized_keys"
# extra_directives = """
# package_update: true
# """
allow_empty = true
"#;

/// Execute the `keywarden init` command.
pub fn execute(config_path: &str) -> Result<()> {
    output::header("Initializing Keywarden");

    let path = Path::new(config_path);
    if path.exists() {
        return Err(KeywardenError::InvalidConfig {
            detail: format!("{} already exists", path.display()),
        });
    }

    std::fs::write(path, CONFIG_TEMPLATE)?;
    output::success(&format!("Created {}", path.display()));

    std::fs::create_dir_all("keys")?;
    output::success("Created keys/ (drop one *.pub file per user here)");

    std::fs::create_dir_all(".keywarden")?;
    std::fs::write(".keywarden/registry.json", "[]\n")?;
    output::success("Created .keywarden/registry.json (empty key-pair registry)");

    println!("\n  Next steps:");
    println!("  1. Add public keys under keys/ (or point [source] at GitHub)");
    println!("  2. Run 'keywarden plan' to see what a sync would do");
    println!("  3. Run 'keywarden sync' to converge and publish the template");

    Ok(())
}
