//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds the clients it needs from the shared [`Context`]
//! 2. Calls into the forge or sync layer
//! 3. Prints the result on stdout
//!
//! Errors are returned with context attached; the binary prints them.

mod dispatch;
mod latest;
mod sync;
mod variable;

pub use dispatch::dispatch_workflow;
pub use latest::latest;
pub use sync::sync;
pub use variable::{get, set};

use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::args::Command;
use super::Context;
use crate::forge::GitHubRepository;
use crate::http::{HttpClient, ReqwestClient};

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Latest { org, project } => latest(ctx, &org, &project).await,
        Command::Get { project } => get(ctx, &project).await,
        Command::Set { project, version } => set(ctx, &project, &version).await,
        Command::Dispatch {
            workflow, inputs, ..
        } => dispatch_workflow(ctx, &workflow, inputs).await,
        Command::Sync { only, dry_run, .. } => sync(ctx, &only, dry_run).await,
    }
}

/// Build the production HTTP client.
fn http_client() -> Result<Arc<dyn HttpClient>> {
    let client = ReqwestClient::new().context("failed to create HTTP client")?;
    Ok(Arc::new(client))
}

/// Build an authenticated client for the configured repository.
fn repository(ctx: &Context) -> Result<GitHubRepository> {
    GitHubRepository::new(&ctx.config, http_client()?)
        .context("failed to create GitHub repository client")
}
