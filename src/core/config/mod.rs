//! core::config
//!
//! Configuration resolution.
//!
//! # Overview
//!
//! Configuration is resolved exactly once at startup into a [`Config`] value
//! that is passed by reference to every collaborator. Nothing else in the
//! crate reads the process environment.
//!
//! # Precedence
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Config file (`--config` or `$VERSYNC_CONFIG`)
//! 3. CLI flags ([`Overrides`])
//!
//! The authentication token only ever comes from `$GH_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use versync::core::config::{Config, Overrides};
//!
//! let config = Config::load(None, &Overrides::default()).unwrap();
//! println!("Repository: {}", config.repository());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::http::DEFAULT_TIMEOUT;

/// Environment variable holding the forge token.
pub const TOKEN_ENV_VAR: &str = "GH_TOKEN";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "VERSYNC_CONFIG";

/// Repository whose variables are kept in sync.
pub const DEFAULT_REPOSITORY: &str = "cncf-tags/green-reviews-tooling";

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default location of the project catalog.
pub const DEFAULT_PROJECTS_FILE: &str = "../projects/project.json";

/// Default ref for workflow dispatches.
pub const DEFAULT_WORKFLOW_REF: &str = "main";

/// Errors from configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the environment variable {var} for the GitHub token is missing or empty")]
    MissingToken { var: &'static str },

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repository: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub projects_file: Option<PathBuf>,
    pub workflow: Option<String>,
    pub workflow_ref: Option<String>,
}

/// Where and how long to talk to the forge API.
///
/// Split out from [`Config`] because unauthenticated calls (latest release
/// lookups) need these settings without needing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }
}

/// Resolved configuration.
#[derive(Clone)]
pub struct Config {
    token: Option<String>,
    repository: String,
    api: ApiSettings,
    projects_file: PathBuf,
    workflow: Option<String>,
    workflow_ref: String,
    source: Option<PathBuf>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_token", &self.token.is_some())
            .field("repository", &self.repository)
            .field("api", &self.api)
            .field("projects_file", &self.projects_file)
            .field("workflow", &self.workflow)
            .field("workflow_ref", &self.workflow_ref)
            .field("source", &self.source)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment and optional file.
    ///
    /// `config_path` takes precedence over `$VERSYNC_CONFIG`. A path that was
    /// named explicitly but cannot be read is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// any resolved value is invalid. A missing token is NOT an error here;
    /// it surfaces when a client that needs it is constructed.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let file = match &path {
            Some(p) => Self::read_file(p)?,
            None => FileConfig::default(),
        };

        let mut config = Self::resolve(file, overrides, |key| std::env::var(key).ok())?;
        config.source = path;
        Ok(config)
    }

    /// Load using only defaults and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None, &Overrides::default())
    }

    /// Resolve configuration from explicit sources.
    ///
    /// `lookup` stands in for the environment so callers (and tests) control
    /// exactly what is visible.
    pub fn resolve(
        file: FileConfig,
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        file.validate()?;

        let token = lookup(TOKEN_ENV_VAR).filter(|t| !t.trim().is_empty());

        let merged = FileConfig {
            repository: overrides.repository.clone().or(file.repository),
            api_base: overrides.api_base.clone().or(file.api_base),
            timeout_secs: overrides.timeout_secs.or(file.timeout_secs),
            projects_file: overrides.projects_file.clone().or(file.projects_file),
            workflow: overrides.workflow.clone().or(file.workflow),
            workflow_ref: overrides.workflow_ref.clone().or(file.workflow_ref),
        };
        merged.validate()?;

        let timeout = merged
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            token,
            repository: merged
                .repository
                .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string()),
            api: ApiSettings::new(
                merged
                    .api_base
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout,
            ),
            projects_file: merged
                .projects_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECTS_FILE)),
            workflow: merged.workflow,
            workflow_ref: merged
                .workflow_ref
                .unwrap_or_else(|| DEFAULT_WORKFLOW_REF.to_string()),
            source: None,
        })
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        FileConfig::parse(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The forge token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if `$GH_TOKEN` was unset or empty.
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken {
            var: TOKEN_ENV_VAR,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Target repository as `owner/name`.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn projects_file(&self) -> &Path {
        &self.projects_file
    }

    /// Workflow to dispatch after an update, if configured.
    pub fn workflow(&self) -> Option<&str> {
        self.workflow.as_deref()
    }

    pub fn workflow_ref(&self) -> &str {
        &self.workflow_ref
    }

    /// Config file the values were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
