//! Clap argument types and config overrides.

use clap::{Parser, ValueEnum};

use changelog_plus::config::Config;
use changelog_plus::constants;
use changelog_plus::models::ChangelogReport;

/// Generate AI-written changelogs from recent GitHub commits.
#[derive(Parser, Debug)]
#[command(name = "changelog-plus", version = constants::VERSION)]
pub struct Cli {
    /// Show debug logging.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate a changelog for a repository and print it.
    Generate(GenerateArgs),

    /// Serve the changelog web form.
    Serve(ServeArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Repository URL, e.g. https://github.com/owner/repo.
    pub url: String,

    /// Lookback window in days.
    #[arg(short, long, default_value_t = 7)]
    pub days: u32,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Maximum concurrent commit detail requests.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Branch the summarizer reads the repository at.
    #[arg(long)]
    pub branch: Option<String>,

    /// Use the faster, lower-effort summarization mode.
    #[arg(long, default_value_t = false)]
    pub no_genius: bool,
}

impl GenerateArgs {
    /// Apply CLI flags on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(n) = self.max_concurrent {
            config.github.max_concurrent = n.max(1);
        }
        if let Some(branch) = &self.branch {
            config.greptile.branch = branch.clone();
        }
        if self.no_genius {
            config.greptile.genius = false;
        }
    }
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind.
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Render a report using the renderer for this format.
    pub fn render(&self, report: &ChangelogReport) -> String {
        use changelog_plus::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => {
                changelog_plus::output::terminal::TerminalRenderer.render(report)
            }
            OutputFormat::Json => changelog_plus::output::json::JsonRenderer.render(report),
            OutputFormat::Markdown => {
                changelog_plus::output::markdown::MarkdownRenderer.render(report)
            }
        }
    }
}
