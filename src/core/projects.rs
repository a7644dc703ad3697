//! core::projects
//!
//! Catalog of upstream projects whose releases are tracked.
//!
//! # Format
//!
//! ```json
//! {
//!   "projects": [
//!     { "name": "falco", "organization": "falcosecurity" }
//!   ]
//! }
//! ```
//!
//! Additional per-project fields used by other tooling are ignored.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::naming::generate_variable_name;

/// Errors from loading the project catalog.
#[derive(Debug, Error)]
pub enum ProjectsError {
    #[error("failed to read project catalog '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse project catalog '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid project catalog: {0}")]
    Invalid(String),
}

/// One tracked upstream project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project (and GitHub repository) name, e.g. `falco`
    pub name: String,
    /// GitHub organization owning the project, e.g. `falcosecurity`
    pub organization: String,
}

impl Project {
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
        }
    }
}

/// The full catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCatalog {
    pub projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, ProjectsError> {
        let contents = fs::read_to_string(path).map_err(|e| ProjectsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let catalog: Self =
            serde_json::from_str(&contents).map_err(|e| ProjectsError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate the catalog.
    ///
    /// Names and organizations must be non-empty, and no two projects may map
    /// to the same repository variable.
    pub fn validate(&self) -> Result<(), ProjectsError> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.name.trim().is_empty() {
                return Err(ProjectsError::Invalid("project name cannot be empty".into()));
            }
            if project.organization.trim().is_empty() {
                return Err(ProjectsError::Invalid(format!(
                    "project '{}' has no organization",
                    project.name
                )));
            }
            if !seen.insert(generate_variable_name(&project.name)) {
                return Err(ProjectsError::Invalid(format!(
                    "duplicate project '{}'",
                    project.name
                )));
            }
        }
        Ok(())
    }

    /// Restrict the catalog to the named projects.
    ///
    /// Names match the way `validate` detects collisions, so `FALCO` and
    /// `falco` select the same project. Repeated names select it once, and
    /// the result keeps catalog order. An empty filter keeps every project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectsError::Invalid` if a requested name is not in the
    /// catalog.
    pub fn select(&self, names: &[String]) -> Result<Vec<Project>, ProjectsError> {
        if names.is_empty() {
            return Ok(self.projects.clone());
        }

        let known: HashSet<String> = self
            .projects
            .iter()
            .map(|p| generate_variable_name(&p.name))
            .collect();

        let mut wanted = HashSet::new();
        for name in names {
            let key = generate_variable_name(name);
            if !known.contains(&key) {
                return Err(ProjectsError::Invalid(format!("unknown project '{}'", name)));
            }
            wanted.insert(key);
        }

        Ok(self
            .projects
            .iter()
            .filter(|p| wanted.contains(&generate_variable_name(&p.name)))
            .cloned()
            .collect())
    }
}
