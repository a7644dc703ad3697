//! cli::commands::sync
//!
//! Update version variables for every tracked project.
//!
//! # Design
//!
//! The sync command:
//! - Loads the project catalog (`--projects`, config file, or default path)
//! - Syncs each selected project in order
//! - Prints one line per project
//! - Fails if any project failed, after all projects were attempted
//!
//! # Example
//!
//! ```bash
//! # Preview
//! versync sync --dry-run
//!
//! # Sync and trigger a workflow on change
//! versync sync --dispatch benchmark-pipeline.yaml
//! ```

use anyhow::{bail, Context as _, Result};

use super::repository;
use crate::cli::Context;
use crate::core::projects::ProjectCatalog;
use crate::sync::{sync_all, DispatchTarget, SyncOptions, SyncOutcome};

/// Run the sync command.
pub async fn sync(ctx: &Context, only: &[String], dry_run: bool) -> Result<()> {
    let path = ctx.config.projects_file();
    let catalog = ProjectCatalog::load(path)
        .with_context(|| format!("failed to load projects from {}", path.display()))?;
    let projects = catalog.select(only)?;

    let repo = repository(ctx)?;
    let options = SyncOptions {
        dry_run,
        dispatch: ctx.config.workflow().map(|workflow| DispatchTarget {
            workflow_file: workflow.to_string(),
            git_ref: ctx.config.workflow_ref().to_string(),
        }),
    };

    let report = sync_all(&repo, &projects, &options).await;

    for entry in &report.results {
        match &entry.result {
            Ok(SyncOutcome::UpToDate { .. }) if ctx.quiet => {}
            Ok(outcome) => println!("{}: {}", entry.project.name, outcome),
            Err(e) => println!("{}: error: {}", entry.project.name, e),
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} projects failed to sync", failed, report.results.len());
    }

    if !ctx.quiet {
        let verb = if dry_run { "would change" } else { "changed" };
        println!(
            "{} project(s) checked, {} {}",
            report.results.len(),
            report.changed(),
            verb
        );
    }
    Ok(())
}
