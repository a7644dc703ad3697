//! core
//!
//! Domain types and configuration for versync.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and resolution
//! - [`naming`] - Repository variable naming
//! - [`projects`] - Catalog of tracked upstream projects
//!
//! Nothing in `core` performs network I/O.

pub mod config;
pub mod naming;
pub mod projects;
