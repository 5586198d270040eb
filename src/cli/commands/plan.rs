use crate::cli::commands::service_helpers;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `keywarden plan` command.
pub fn execute(config_path: &str) -> Result<()> {
    let config = service_helpers::load_config(config_path)?;
    let service = service_helpers::build_service(&config)?;

    let preview = service.preview()?;

    for rejected in &preview.desired.rejected {
        output::warning(&format!(
            "Excluded malformed key '{}': {}",
            rejected.name, rejected.reason
        ));
    }

    output::header(&format!(
        "Plan: {} desired key(s), {} managed key pair(s)",
        preview.desired.len(),
        preview.inventory.len()
    ));

    if preview.plan.is_empty() {
        output::success("Inventory already matches the desired key set.");
        return Ok(());
    }

    for record in &preview.plan.to_add {
        output::plan_add(&format!("{record}"));
    }
    for entry in &preview.plan.to_delete {
        output::plan_delete(&format!("{entry}"));
    }

    println!(
        "\n  {} to add, {} to delete.",
        preview.plan.to_add.len(),
        preview.plan.to_delete.len()
    );

    if preview.plan.is_full_teardown(preview.inventory.len()) {
        output::warning(
            "This plan deletes every managed key pair; 'keywarden sync' will \
             refuse it without --allow-teardown.",
        );
    }

    Ok(())
}
