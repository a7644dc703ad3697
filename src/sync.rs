//! sync
//!
//! Bring repository variables up to date with upstream releases.
//!
//! # Flow
//!
//! For each project, in order:
//! 1. Fetch the latest release tag of `organization/name`
//! 2. Read the stored `<name>_version` variable
//! 3. If they differ, update the variable (unless this is a dry run)
//! 4. After an update, dispatch the configured workflow, if any
//!
//! Versions are compared as plain strings. A failing project is recorded in
//! the [`SyncReport`] and the remaining projects are still processed.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::core::projects::Project;
use crate::forge::{fetch_latest_release, ForgeError, GitHubRepository};

/// Workflow input naming the project that changed.
pub const INPUT_PROJECT: &str = "project";

/// Workflow input carrying the new version.
pub const INPUT_VERSION: &str = "version";

/// Workflow to trigger after a variable changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub workflow_file: String,
    pub git_ref: String,
}

/// Options for a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Report what would change without writing anything
    pub dry_run: bool,
    /// Workflow dispatched after each update
    pub dispatch: Option<DispatchTarget>,
}

/// What happened to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Stored value already matches the latest release.
    UpToDate { version: String },
    /// Stored value was replaced.
    Updated {
        previous: String,
        current: String,
        dispatched: bool,
    },
    /// Dry run: the stored value would have been replaced.
    WouldUpdate { previous: String, current: String },
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncOutcome::UpToDate { version } => write!(f, "up to date ({})", version),
            SyncOutcome::Updated {
                previous,
                current,
                dispatched,
            } => {
                write!(f, "updated {} -> {}", previous, current)?;
                if *dispatched {
                    write!(f, " (workflow dispatched)")?;
                }
                Ok(())
            }
            SyncOutcome::WouldUpdate { previous, current } => {
                write!(f, "would update {} -> {}", previous, current)
            }
        }
    }
}

/// Result for one project of a sync run.
#[derive(Debug)]
pub struct ProjectResult {
    pub project: Project,
    pub result: Result<SyncOutcome, ForgeError>,
}

/// Results of a sync run, in catalog order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<ProjectResult>,
}

impl SyncReport {
    /// Projects that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ProjectResult> {
        self.results.iter().filter(|r| r.result.is_err())
    }

    /// Number of variables that were (or in a dry run would be) changed.
    pub fn changed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r.result,
                    Ok(SyncOutcome::Updated { .. }) | Ok(SyncOutcome::WouldUpdate { .. })
                )
            })
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Sync a single project.
///
/// # Errors
///
/// Returns the first [`ForgeError`] hit. If the dispatch fails after a
/// successful update, the variable stays updated and the dispatch error is
/// returned.
pub async fn sync_project(
    repo: &GitHubRepository,
    project: &Project,
    options: &SyncOptions,
) -> Result<SyncOutcome, ForgeError> {
    let latest =
        fetch_latest_release(repo.http(), repo.api(), &project.organization, &project.name)
            .await?;
    let stored = repo.read_repo_variable(&project.name).await?;

    if stored == latest {
        info!(project = %project.name, version = %latest, "already up to date");
        return Ok(SyncOutcome::UpToDate { version: latest });
    }

    if options.dry_run {
        info!(project = %project.name, from = %stored, to = %latest, "would update");
        return Ok(SyncOutcome::WouldUpdate {
            previous: stored,
            current: latest,
        });
    }

    repo.update_repo_variable(&project.name, &latest).await?;

    let dispatched = match &options.dispatch {
        Some(target) => {
            let mut inputs = BTreeMap::new();
            inputs.insert(INPUT_PROJECT.to_string(), project.name.clone());
            inputs.insert(INPUT_VERSION.to_string(), latest.clone());
            if let Err(e) = repo
                .dispatch_workflow(&target.workflow_file, &target.git_ref, &inputs)
                .await
            {
                warn!(
                    project = %project.name,
                    version = %latest,
                    "variable updated but workflow dispatch failed"
                );
                return Err(e);
            }
            true
        }
        None => false,
    };

    Ok(SyncOutcome::Updated {
        previous: stored,
        current: latest,
        dispatched,
    })
}

/// Sync every project, one after another.
pub async fn sync_all(
    repo: &GitHubRepository,
    projects: &[Project],
    options: &SyncOptions,
) -> SyncReport {
    let mut report = SyncReport::default();
    for project in projects {
        let result = sync_project(repo, project, options).await;
        if let Err(ref e) = result {
            warn!(project = %project.name, error = %e, "sync failed");
        }
        report.results.push(ProjectResult {
            project: project.clone(),
            result,
        });
    }
    report
}
