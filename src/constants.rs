//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and upstream URLs so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "changelog-plus";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was built for.
pub const TARGET: &str = env!("TARGET");

/// `User-Agent` sent on every outbound request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("changelog-plus/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `.changelog-plus.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".changelog-plus.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "changelog-plus";

// ── Upstream endpoints ──────────────────────────────────────────────

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
pub const GREPTILE_API_URL: &str = "https://api.greptile.com/v2";

/// Remote kind Greptile expects for GitHub-hosted repositories.
pub const GREPTILE_REMOTE: &str = "github";

/// Branch Greptile indexes when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

// ── Limits and defaults ─────────────────────────────────────────────

/// Default cap on in-flight commit detail fetches.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Largest accepted lookback window, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Shown to web users whenever no changelog could be produced.
pub const FAILURE_MESSAGE: &str = "Failed to generate changelog.";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_GITHUB_TOKEN: &str = "CHANGELOG_GITHUB_TOKEN";
pub const ENV_GITHUB_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";
pub const ENV_GREPTILE_API_KEY: &str = "CHANGELOG_GREPTILE_API_KEY";
pub const ENV_GREPTILE_API_KEY_FALLBACK: &str = "GREPTILE_API_KEY";
pub const ENV_GITHUB_API_URL: &str = "CHANGELOG_GITHUB_API_URL";
pub const ENV_GREPTILE_API_URL: &str = "CHANGELOG_GREPTILE_API_URL";
pub const ENV_MAX_CONCURRENT: &str = "CHANGELOG_MAX_CONCURRENT";
