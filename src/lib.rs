//! versync - keep repository variables in sync with upstream releases
//!
//! versync checks the latest published release of a set of upstream
//! projects on GitHub and records each one in a repository Actions variable
//! (`<PROJECT>_VERSION`), optionally triggering a workflow when a version
//! changes.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs commands)
//! - [`sync`] - Compare-and-update driver over the project catalog
//! - [`forge`] - GitHub REST client for variables, dispatches and releases
//! - [`http`] - Single-request HTTP transport and its test double
//! - [`core`] - Configuration, project catalog and variable naming
//!
//! # Guarantees
//!
//! 1. Every forge call is a single request; nothing is retried
//! 2. The token is read once, at configuration time, and never logged
//! 3. Response bodies are fully consumed before a call returns

pub mod cli;
pub mod core;
pub mod forge;
pub mod http;
pub mod sync;
