//! cli::commands::variable
//!
//! Read and write a project's version variable.
//!
//! # Example
//!
//! ```bash
//! versync get falco
//! versync set falco 0.39.0
//! ```

use anyhow::{Context as _, Result};

use super::repository;
use crate::cli::Context;
use crate::core::naming::payload_variable_name;

/// Run the get command.
pub async fn get(ctx: &Context, project: &str) -> Result<()> {
    let repo = repository(ctx)?;
    let value = repo.read_repo_variable(project).await.with_context(|| {
        format!(
            "failed to read {} in {}",
            repo.generate_variable_name(project),
            repo.repository()
        )
    })?;

    println!("{}", value);
    Ok(())
}

/// Run the set command.
pub async fn set(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let repo = repository(ctx)?;
    repo.update_repo_variable(project, version)
        .await
        .with_context(|| {
            format!(
                "failed to update {} in {}",
                repo.generate_variable_name(project),
                repo.repository()
            )
        })?;

    if !ctx.quiet {
        println!("{} = {}", payload_variable_name(project), version);
    }
    Ok(())
}
