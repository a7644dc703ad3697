//! core::config::schema
//!
//! On-disk configuration schema.
//!
//! # Location
//!
//! The file is optional. It is read from (in order):
//! 1. the `--config <path>` flag
//! 2. `$VERSYNC_CONFIG` if set
//!
//! # Validation
//!
//! Values are validated after parsing and again after CLI overrides are
//! applied, so a bad flag is reported the same way as a bad file entry.
//! The authentication token is deliberately not part of this schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// repository = "cncf-tags/green-reviews-tooling"
/// api_base = "https://api.github.com"
/// timeout_secs = 60
/// projects_file = "../projects/project.json"
/// workflow = "benchmark-pipeline.yaml"
/// workflow_ref = "main"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Target repository as `owner/name`
    pub repository: Option<String>,

    /// Forge API base URL
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Path to the project catalog
    pub projects_file: Option<PathBuf>,

    /// Workflow file to dispatch after a variable changes
    pub workflow: Option<String>,

    /// Git ref the dispatched workflow runs on
    pub workflow_ref: Option<String>,
}

impl FileConfig {
    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.repository {
            validate_repository(repo)?;
        }
        if let Some(base) = &self.api_base {
            validate_api_base(base)?;
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        if let Some(workflow) = &self.workflow {
            if workflow.trim().is_empty() {
                return Err(ConfigError::InvalidValue("workflow cannot be empty".into()));
            }
        }
        if let Some(git_ref) = &self.workflow_ref {
            if git_ref.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "workflow_ref cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Check that a repository identifier has the `owner/name` shape.
pub fn validate_repository(repo: &str) -> Result<(), ConfigError> {
    let mut parts = repo.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidValue(format!(
            "invalid repository '{}', expected 'owner/name'",
            repo
        ))),
    }
}

/// Check that an API base URL is usable.
pub fn validate_api_base(base: &str) -> Result<(), ConfigError> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid api_base '{}', must start with http:// or https://",
            base
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let toml = r#"
            repository = "octocat/hello-world"
            api_base = "https://github.example.com/api/v3"
            timeout_secs = 30
            projects_file = "projects.json"
            workflow = "bench.yaml"
            workflow_ref = "release"
        "#;

        let config = FileConfig::parse(toml).unwrap();
        assert_eq!(config.repository.as_deref(), Some("octocat/hello-world"));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.projects_file, Some(PathBuf::from("projects.json")));
        assert_eq!(config.workflow_ref.as_deref(), Some("release"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_empty_file_uses_defaults() {
        let config = FileConfig::parse("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("token = \"ghp_secret\"").is_err());
    }

    #[test]
    fn repository_shape() {
        assert!(validate_repository("owner/name").is_ok());
        assert!(validate_repository("owner").is_err());
        assert!(validate_repository("/name").is_err());
        assert!(validate_repository("owner/").is_err());
        assert!(validate_repository("a/b/c").is_err());
    }

    #[test]
    fn api_base_scheme() {
        assert!(validate_api_base("https://api.github.com").is_ok());
        assert!(validate_api_base("http://127.0.0.1:8080").is_ok());
        assert!(validate_api_base("api.github.com").is_err());
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = FileConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
