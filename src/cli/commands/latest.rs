//! cli::commands::latest
//!
//! Print the latest release tag of an upstream project.
//!
//! # Example
//!
//! ```bash
//! versync latest falcosecurity falco
//! ```

use anyhow::{Context as _, Result};

use super::http_client;
use crate::cli::Context;
use crate::forge::fetch_latest_release;

/// Run the latest command.
///
/// Needs no token.
pub async fn latest(ctx: &Context, org: &str, project: &str) -> Result<()> {
    let http = http_client()?;
    let tag = fetch_latest_release(http.as_ref(), ctx.config.api(), org, project)
        .await
        .with_context(|| format!("failed to fetch latest release of {}/{}", org, project))?;

    println!("{}", tag);
    Ok(())
}
