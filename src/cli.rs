// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Flags override values from rollout.yml.

use clap::Parser;
use rollout::config::Overrides;
use rollout::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollout")]
#[command(about = "Build, publish, and roll out a container image to Cloud Run services")]
#[command(version)]
pub struct Cli {
    /// Docker image name
    #[arg(long)]
    pub image: Option<String>,

    /// Semicolon separated Cloud Run services
    #[arg(long)]
    pub svc: Option<String>,

    /// Use the dev tag and skip image cleanup
    #[arg(long)]
    pub beta: bool,

    /// Number of Docker image digests to retain (>=1)
    #[arg(long, allow_negative_numbers = true)]
    pub keep_images: Option<i64>,

    /// Number of Cloud Run revisions to retain (>=1)
    #[arg(long, allow_negative_numbers = true)]
    pub keep_revisions: Option<i64>,

    /// GCP project to deploy to
    #[arg(long)]
    pub project: Option<String>,

    /// Cloud Run region
    #[arg(long)]
    pub region: Option<String>,

    /// Container registry host (e.g. gcr.io, asia.gcr.io); inferred from --region if omitted
    #[arg(long)]
    pub registry_host: Option<String>,

    /// Build tool (pnpm, npm, yarn, go, rust); detected from the workspace if omitted
    #[arg(long)]
    pub lang: Option<String>,

    /// Target platform for docker build
    #[arg(long)]
    pub platform: Option<String>,

    /// Project workspace (defaults to the current directory)
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Config file (defaults to rollout.yml in the workspace)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            image: self.image.clone(),
            services: self.svc.clone(),
            beta: self.beta,
            project: self.project.clone(),
            region: self.region.clone(),
            registry_host: self.registry_host.clone(),
            lang: self.lang.clone(),
            keep_images: self.keep_images,
            keep_revisions: self.keep_revisions,
            platform: self.platform.clone(),
        }
    }
}
