//! cli
//!
//! Command-line interface layer for versync.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Resolve configuration once and hand it to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers in [`commands`] call into
//! [`crate::forge`] and [`crate::sync`] and format the results. All work is
//! driven from a single-threaded tokio runtime; requests are issued one at a
//! time.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use anyhow::{Context as _, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;

/// Shared state for command handlers.
#[derive(Debug)]
pub struct Context {
    /// Resolved configuration
    pub config: Config,
    /// Minimal output
    pub quiet: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug, cli.quiet);

    let config = Config::load(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;
    debug!(?config, "resolved configuration");

    let ctx = Context {
        config,
        quiet: cli.quiet,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    rt.block_on(commands::dispatch(cli.command, &ctx))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` and `--quiet` pick the
/// level. Logs go to stderr so command output on stdout stays clean.
fn init_logging(debug: bool, quiet: bool) {
    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
