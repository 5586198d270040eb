use crate::cli::commands::service_helpers;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `keywarden status` command.
pub fn execute(config_path: &str) -> Result<()> {
    let config = service_helpers::load_config(config_path)?;
    let service = service_helpers::build_service(&config)?;

    let preview = service.preview()?;

    output::header("Keywarden status");
    println!(
        "  Source:    {} valid key(s), {} rejected",
        preview.desired.len(),
        preview.desired.rejected.len()
    );
    println!(
        "  Inventory: {} managed key pair(s) (suffix '{}')",
        preview.inventory.len(),
        config.provider.managed_suffix
    );
    println!("  Publish:   {}", config.publish.location);

    if preview.plan.is_empty() {
        output::success("In sync.");
    } else {
        output::warning(&format!(
            "Out of sync: {} to add, {} to delete. Run 'keywarden plan' for details.",
            preview.plan.to_add.len(),
            preview.plan.to_delete.len()
        ));
    }

    Ok(())
}
