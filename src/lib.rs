//! changelog-plus: AI-written changelogs from recent GitHub commits (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod changelog;
pub mod collector;
pub mod config;
pub mod constants;
pub mod env;
pub mod forge;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod providers;
pub mod server;
