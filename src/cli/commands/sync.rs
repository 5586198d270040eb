use crate::cli::commands::service_helpers;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::apply_report::ApplyOutcome;
use crate::core::services::sync_service::SyncOptions;

/// Execute the `keywarden sync` command.
pub fn execute(config_path: &str, dry_run: bool, allow_teardown: bool) -> Result<()> {
    let config = service_helpers::load_config(config_path)?;
    let service = service_helpers::build_service(&config)?;

    let opts = SyncOptions {
        dry_run,
        allow_teardown,
        location: config.publish.location.clone(),
    };

    let report = service.run(&config.bootstrap, &opts)?;

    for rejected in &report.desired.rejected {
        output::warning(&format!(
            "Excluded malformed key '{}': {}",
            rejected.name, rejected.reason
        ));
    }

    if dry_run {
        output::header("Dry run — nothing was changed");
        println!(
            "  Would add {}, delete {}, render {} key(s) to {}",
            report.plan.to_add.len(),
            report.plan.to_delete.len(),
            report.effective.len(),
            opts.location
        );
        return Ok(());
    }

    output::header("Applying plan");
    let Some(apply) = report.apply.as_ref() else {
        return Ok(());
    };

    if apply.added.is_empty() && apply.deleted.is_empty() {
        output::success("Nothing to apply; inventory already converged.");
    }
    for (record, outcome) in &apply.added {
        match outcome {
            ApplyOutcome::Success => output::success(&format!("Added {record}")),
            ApplyOutcome::Failure(reason) => {
                output::warning(&format!("Failed to add {record}: {reason}"));
            }
        }
    }
    for (entry, outcome) in &apply.deleted {
        match outcome {
            ApplyOutcome::Success => output::success(&format!("Deleted {entry}")),
            ApplyOutcome::Failure(reason) => {
                output::warning(&format!("Failed to delete {entry}: {reason}"));
            }
        }
    }

    if apply.failure_count() > 0 {
        output::warning(&format!(
            "{} operation(s) failed; the template reflects only the keys \
             actually registered. The next sync retries the rest.",
            apply.failure_count()
        ));
    }

    if let Some(template) = report.template.as_ref() {
        output::header("Published");
        output::success(&format!(
            "{} key(s) → {}",
            report.effective.len(),
            report.published_to.as_deref().unwrap_or(&opts.location)
        ));
        println!("  sha256: {}", template.content_hash);
    }

    Ok(())
}
