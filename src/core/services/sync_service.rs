use std::collections::HashSet;

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::apply_report::ApplyReport;
use crate::core::models::desired_key_set::DesiredKeySet;
use crate::core::models::inventory_entry::InventoryEntry;
use crate::core::models::key_record::KeyRecord;
use crate::core::models::plan::ReconciliationPlan;
use crate::core::models::rendered_template::RenderedTemplate;
use crate::core::services::reconciler::Reconciler;
use crate::core::services::template_generator::{BootstrapConfig, TemplateGenerator};
use crate::core::traits::applier::Applier;
use crate::core::traits::key_source::KeySource;
use crate::core::traits::provider_inventory::ProviderInventory;
use crate::core::traits::publisher::Publisher;

/// Options for a single sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Compute and report the plan without applying or publishing.
    pub dry_run: bool,
    /// Permit a plan that deletes the entire managed inventory.
    pub allow_teardown: bool,
    /// Where the publisher stores the rendered template.
    pub location: String,
}

/// Everything a run did, for the caller to report.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub desired: DesiredKeySet,
    pub inventory: Vec<InventoryEntry>,
    pub plan: ReconciliationPlan,
    /// Per-item outcomes; `None` on a dry run.
    pub apply: Option<ApplyReport>,
    /// Keys actually registered after the run, in desired order.
    pub effective: Vec<KeyRecord>,
    /// The published template; `None` on a dry run.
    pub template: Option<RenderedTemplate>,
    pub published_to: Option<String>,
}

/// A read-only view of source, inventory, and the plan between them.
#[derive(Debug, Clone)]
pub struct PlanPreview {
    pub desired: DesiredKeySet,
    pub inventory: Vec<InventoryEntry>,
    pub plan: ReconciliationPlan,
}

/// Orchestrates one stateless convergence run over the four ports.
///
/// There is no state carried between runs: each invocation re-reads
/// both sides and re-diffs, which is what heals prior partial failures.
pub struct SyncService<S, I, A, P> {
    pub source: S,
    pub inventory: I,
    pub applier: A,
    pub publisher: P,
    /// Only inventory entries whose name ends with this suffix are
    /// managed; everything else in the provider is left alone.
    pub managed_suffix: String,
}

impl<S, I, A, P> SyncService<S, I, A, P>
where
    S: KeySource,
    I: ProviderInventory,
    A: Applier,
    P: Publisher,
{
    /// Fetch both sides and compute the plan without touching anything.
    pub fn preview(&self) -> Result<PlanPreview> {
        let desired = self.source.fetch_desired_keys()?;
        let inventory = self.managed_inventory()?;
        let plan = Reconciler.reconcile(&desired, &inventory);
        Ok(PlanPreview {
            desired,
            inventory,
            plan,
        })
    }

    /// Run the full pipeline: fetch, reconcile, apply, render, publish.
    pub fn run(&self, bootstrap: &BootstrapConfig, opts: &SyncOptions) -> Result<SyncReport> {
        let PlanPreview {
            desired,
            inventory,
            plan,
        } = self.preview()?;

        if plan.is_full_teardown(inventory.len()) && !opts.allow_teardown {
            return Err(KeywardenError::TeardownRefused {
                count: inventory.len(),
            });
        }

        if opts.dry_run {
            let effective = effective_keys(&desired, &inventory, None);
            return Ok(SyncReport {
                desired,
                inventory,
                plan,
                apply: None,
                effective,
                template: None,
                published_to: None,
            });
        }

        let report = self.apply_plan(&plan);
        let effective = effective_keys(&desired, &inventory, Some(&report));

        // Render from what is actually registered, never the aspirational
        // set. A render failure aborts before the publisher runs, so a
        // stale template is never overwritten with a wrong one.
        let template = TemplateGenerator.render(&effective, bootstrap)?;
        self.publisher.store(&template, &opts.location)?;

        Ok(SyncReport {
            desired,
            inventory,
            plan,
            apply: Some(report),
            effective,
            template: Some(template),
            published_to: Some(opts.location.clone()),
        })
    }

    fn managed_inventory(&self) -> Result<Vec<InventoryEntry>> {
        let all = self.inventory.list_key_pairs()?;
        Ok(all
            .into_iter()
            .filter(|e| e.name.ends_with(&self.managed_suffix))
            .collect())
    }

    fn apply_plan(&self, plan: &ReconciliationPlan) -> ApplyReport {
        let added = plan
            .to_add
            .iter()
            .map(|record| (record.clone(), self.applier.create_key_pair(record)))
            .collect();
        let deleted = plan
            .to_delete
            .iter()
            .map(|entry| (entry.clone(), self.applier.delete_key_pair(entry)))
            .collect();
        ApplyReport { added, deleted }
    }
}

/// The key set actually registered after a run: every valid desired key
/// that was already in the inventory (retained) or whose add succeeded.
///
/// Entries whose delete failed stay registered but are not desired and
/// carry no material, so they cannot (and must not) be rendered.
fn effective_keys(
    desired: &DesiredKeySet,
    inventory: &[InventoryEntry],
    apply: Option<&ApplyReport>,
) -> Vec<KeyRecord> {
    // Without an apply report (dry run) the prediction is that every
    // desired key converges.
    let Some(report) = apply else {
        return desired.keys.clone();
    };

    let retained: HashSet<&str> = inventory.iter().map(|e| e.fingerprint.as_str()).collect();
    let added: HashSet<&str> = report.added_fingerprints().collect();

    desired
        .keys
        .iter()
        .filter(|k| retained.contains(k.fingerprint.as_str()) || added.contains(k.fingerprint.as_str()))
        .cloned()
        .collect()
}
