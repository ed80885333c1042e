use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod error;
mod job;
mod orchestrator;
mod plan;
mod planner;
mod workspace;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("polyplan=debug")
    } else {
        EnvFilter::new("polyplan=warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Solve(args) => cli::solve::execute(args).await,
        Commands::Planners(args) => cli::planners::execute(args),
    }
}
