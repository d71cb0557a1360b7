// ABOUTME: Entry point for the rollout CLI application.
// ABOUTME: Loads configuration, runs the release pipeline, and reports elapsed time.

mod cli;

use clap::Parser;
use cli::Cli;
use rollout::config::{FileConfig, ReleaseConfig};
use rollout::deploy::Release;
use rollout::error::Result;
use rollout::output::Output;
use rollout::process::{DryRunRunner, ProcessRunner, SystemRunner};
use std::env;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let started = Instant::now();
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output, started);

    if let Err(e) = run(cli, started, output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }

    output.done();
}

async fn run(cli: Cli, started: Instant, output: Output) -> Result<()> {
    let workdir = match cli.workdir.clone() {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::discover(&workdir)?.unwrap_or_default(),
    };

    let config = ReleaseConfig::build(file, cli.overrides(), workdir, started)?;

    if cli.dry_run {
        release(Arc::new(DryRunRunner::new()), config, output).await
    } else {
        release(Arc::new(SystemRunner), config, output).await
    }
}

async fn release<R: ProcessRunner + 'static>(
    runner: Arc<R>,
    config: ReleaseConfig,
    output: Output,
) -> Result<()> {
    let summary = Release::new(runner, config, output).run().await?;

    tracing::info!(
        image = %summary.image,
        services = summary.services.len(),
        "release complete"
    );
    Ok(())
}
