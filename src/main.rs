//! changelog-plus: AI-written changelogs from recent GitHub commits.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use changelog_plus::config::Config;
use changelog_plus::constants;
use changelog_plus::env::Env;
use changelog_plus::pipeline::ChangelogPipeline;
use changelog_plus::server;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cli::args::{Cli, Command, GenerateArgs, ServeArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Serve(args) => run_serve(args).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Load config from the usual layers for the current directory.
fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Config::load(Some(&cwd), &Env::real()).context("failed to load configuration")
}

/// Generate one changelog and print it to stdout.
async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config()?;
    args.apply_to(&mut config);

    let pipeline = ChangelogPipeline::from_config(&config)?;

    let Some(report) = pipeline.run(&args.url, args.days).await? else {
        bail!(
            "could not determine owner and repository from '{}'\n  \
             usage: {} generate https://github.com/<owner>/<repo> --days <N>",
            args.url,
            constants::APP_NAME
        );
    };

    print!("{}", args.format.render(&report));
    Ok(())
}

/// Serve the web form until interrupted.
async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config()?;
    args.apply_to(&mut config);

    let pipeline = ChangelogPipeline::from_config(&config)?;

    server::run(pipeline, &config.server.host, config.server.port)
        .await
        .with_context(|| {
            format!(
                "web server failed on {}:{}",
                config.server.host, config.server.port
            )
        })
}
