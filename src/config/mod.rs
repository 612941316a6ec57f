//! Configuration loading and layering.
//!
//! Handles `.changelog-plus.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering.

pub mod loader;

pub use loader::{Config, ConfigError, GitHubConfig, GreptileConfig, ServerConfig};
