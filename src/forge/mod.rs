//! forge
//!
//! GitHub REST client for repository variables, workflow dispatch and
//! release lookups.
//!
//! # Modules
//!
//! - `endpoint`: URL templates for the endpoints versync calls
//! - `errors`: [`ForgeError`], shared by every operation
//! - [`github`]: [`GitHubRepository`] and [`fetch_latest_release`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use versync::core::config::Config;
//! use versync::forge::{fetch_latest_release, GitHubRepository};
//! use versync::http::ReqwestClient;
//!
//! let config = Config::from_env()?;
//! let repo = GitHubRepository::new(&config, Arc::new(ReqwestClient::new()?))?;
//!
//! let latest = fetch_latest_release(repo.http(), repo.api(), "falcosecurity", "falco").await?;
//! if repo.read_repo_variable("falco").await? != latest {
//!     repo.update_repo_variable("falco", &latest).await?;
//! }
//! ```

mod endpoint;
mod errors;
pub mod github;

pub use endpoint::{latest_release_url, Endpoint};
pub use errors::ForgeError;
pub use github::{fetch_latest_release, GitHubRepository, ACCEPT_VALUE, API_VERSION};
