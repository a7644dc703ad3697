//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--config <path>`: Config file (otherwise `$VERSYNC_CONFIG`)
//! - `--repo <owner/name>`: Repository whose variables are managed
//! - `--api-base <url>`: Forge API base URL
//! - `--timeout <secs>`: Per-request timeout
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Overrides;

/// versync - keep repository variables in sync with upstream releases
#[derive(Parser, Debug)]
#[command(name = "versync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository whose variables are managed
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Forge API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Configuration values set by flags.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            repository: self.repo.clone(),
            api_base: self.api_base.clone(),
            timeout_secs: self.timeout,
            ..Default::default()
        };

        match &self.command {
            Command::Dispatch { git_ref, .. } => {
                overrides.workflow_ref = git_ref.clone();
            }
            Command::Sync {
                projects,
                dispatch,
                git_ref,
                ..
            } => {
                overrides.projects_file = projects.clone();
                overrides.workflow = dispatch.clone();
                overrides.workflow_ref = git_ref.clone();
            }
            _ => {}
        }

        overrides
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the latest release tag of an upstream project
    Latest {
        /// Organization owning the project
        org: String,
        /// Project repository name
        project: String,
    },

    /// Print the stored version variable of a project
    Get {
        /// Project name
        project: String,
    },

    /// Overwrite the version variable of a project
    Set {
        /// Project name
        project: String,
        /// New version value
        version: String,
    },

    /// Trigger a workflow_dispatch run on the repository
    Dispatch {
        /// Workflow file name (e.g. benchmark-pipeline.yaml)
        workflow: String,

        /// Git ref to run the workflow on
        #[arg(long = "ref", value_name = "REF")]
        git_ref: Option<String>,

        /// Workflow input (repeatable)
        #[arg(long = "input", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        inputs: Vec<(String, String)>,
    },

    /// Update version variables for every tracked project
    #[command(after_help = "\
EXAMPLES:
    # Show what would change
    versync sync --dry-run

    # Sync two projects and trigger the benchmark workflow on change
    versync sync --only falco --only kepler --dispatch benchmark-pipeline.yaml")]
    Sync {
        /// Project catalog file
        #[arg(long, value_name = "PATH")]
        projects: Option<PathBuf>,

        /// Only sync these projects (repeatable)
        #[arg(long = "only", value_name = "PROJECT")]
        only: Vec<String>,

        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,

        /// Workflow to dispatch after a variable changes
        #[arg(long, value_name = "WORKFLOW")]
        dispatch: Option<String>,

        /// Git ref for dispatched workflows
        #[arg(long = "ref", value_name = "REF")]
        git_ref: Option<String>,
    },
}

/// Parse a `KEY=VALUE` pair.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid input '{}', expected KEY=VALUE", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_key_value_pairs() {
        assert_eq!(
            parse_key_value("project=falco").unwrap(),
            ("project".to_string(), "falco".to_string())
        );
        assert_eq!(
            parse_key_value("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn global_flags_become_overrides() {
        let cli = Cli::parse_from([
            "versync",
            "get",
            "falco",
            "--repo",
            "owner/repo",
            "--timeout",
            "5",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.repository.as_deref(), Some("owner/repo"));
        assert_eq!(overrides.timeout_secs, Some(5));
        assert!(overrides.projects_file.is_none());
    }

    #[test]
    fn sync_flags_become_overrides() {
        let cli = Cli::parse_from([
            "versync",
            "sync",
            "--projects",
            "p.json",
            "--dispatch",
            "bench.yaml",
            "--ref",
            "dev",
            "--only",
            "falco",
            "--dry-run",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.projects_file, Some(PathBuf::from("p.json")));
        assert_eq!(overrides.workflow.as_deref(), Some("bench.yaml"));
        assert_eq!(overrides.workflow_ref.as_deref(), Some("dev"));

        match cli.command {
            Command::Sync { only, dry_run, .. } => {
                assert_eq!(only, vec!["falco".to_string()]);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn dispatch_collects_inputs() {
        let cli = Cli::parse_from([
            "versync",
            "dispatch",
            "bench.yaml",
            "--input",
            "project=falco",
            "--input",
            "version=0.39.0",
        ]);
        match cli.command {
            Command::Dispatch {
                workflow, inputs, ..
            } => {
                assert_eq!(workflow, "bench.yaml");
                assert_eq!(inputs.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
