//! cli::commands::dispatch
//!
//! Trigger a workflow_dispatch run.
//!
//! # Example
//!
//! ```bash
//! versync dispatch benchmark-pipeline.yaml --ref main --input project=falco
//! ```

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};

use super::repository;
use crate::cli::Context;

/// Run the dispatch command.
///
/// The ref comes from `--ref`, the config file, or defaults to `main`.
pub async fn dispatch_workflow(
    ctx: &Context,
    workflow: &str,
    inputs: Vec<(String, String)>,
) -> Result<()> {
    let repo = repository(ctx)?;
    let git_ref = ctx.config.workflow_ref();
    let inputs: BTreeMap<String, String> = inputs.into_iter().collect();

    repo.dispatch_workflow(workflow, git_ref, &inputs)
        .await
        .with_context(|| format!("failed to dispatch {} on {}", workflow, repo.repository()))?;

    if !ctx.quiet {
        println!("Dispatched {} on {} ({})", workflow, repo.repository(), git_ref);
    }
    Ok(())
}
