//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.changelog-plus.toml` in the working directory
//! 4. `~/.config/changelog-plus/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub greptile: GreptileConfig,
    pub server: ServerConfig,
}

/// Source-control access: token, API root and fan-out limit.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub api_url: String,
    /// Upper bound on concurrent commit detail requests.
    pub max_concurrent: usize,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("max_concurrent", &self.max_concurrent)
            .finish()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: constants::GITHUB_API_URL.to_string(),
            max_concurrent: constants::DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Summarization service settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GreptileConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    /// Branch the service should read the repository at.
    pub branch: String,
    /// Request the slower, higher-effort answer mode.
    pub genius: bool,
}

impl std::fmt::Debug for GreptileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreptileConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("branch", &self.branch)
            .field("genius", &self.genius)
            .finish()
    }
}

impl Default for GreptileConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: constants::GREPTILE_API_URL.to_string(),
            branch: constants::DEFAULT_BRANCH.to_string(),
            genius: true,
        }
    }
}

/// Bind address for the web form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, the local config in `workdir`, then applies
    /// environment variable overrides. CLI flags are applied by the caller.
    pub fn load(workdir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                tracing::debug!("loading global config from {}", global_path.display());
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(dir) = workdir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                tracing::debug!("loading local config from {}", local_path.display());
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one; only fields that differ from the
    /// built-in defaults override.
    fn merge(&mut self, other: Config) {
        let default_github = GitHubConfig::default();
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.api_url != default_github.api_url {
            self.github.api_url = other.github.api_url;
        }
        if other.github.max_concurrent != default_github.max_concurrent {
            self.github.max_concurrent = other.github.max_concurrent;
        }

        let default_greptile = GreptileConfig::default();
        if other.greptile.api_key.is_some() {
            self.greptile.api_key = other.greptile.api_key;
        }
        if other.greptile.api_url != default_greptile.api_url {
            self.greptile.api_url = other.greptile.api_url;
        }
        if other.greptile.branch != default_greptile.branch {
            self.greptile.branch = other.greptile.branch;
        }
        // Disabled overrides enabled
        if !other.greptile.genius {
            self.greptile.genius = false;
        }

        let default_server = ServerConfig::default();
        if other.server.host != default_server.host {
            self.server.host = other.server.host;
        }
        if other.server.port != default_server.port {
            self.server.port = other.server.port;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(token) = env.first_non_empty(&[
            constants::ENV_GITHUB_TOKEN,
            constants::ENV_GITHUB_TOKEN_FALLBACK,
        ]) {
            self.github.token = Some(token);
        }
        if let Some(key) = env.first_non_empty(&[
            constants::ENV_GREPTILE_API_KEY,
            constants::ENV_GREPTILE_API_KEY_FALLBACK,
        ]) {
            self.greptile.api_key = Some(key);
        }
        if let Some(url) = env.non_empty(constants::ENV_GITHUB_API_URL) {
            self.github.api_url = url;
        }
        if let Some(url) = env.non_empty(constants::ENV_GREPTILE_API_URL) {
            self.greptile.api_url = url;
        }
        if let Some(val) = env.non_empty(constants::ENV_MAX_CONCURRENT) {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.github.max_concurrent = n,
                _ => tracing::warn!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_MAX_CONCURRENT
                ),
            }
        }
    }
}
