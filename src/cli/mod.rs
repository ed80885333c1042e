pub mod planners;
pub mod solve;

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyplan")]
#[command(
    author,
    version,
    about = "Parallel PDDL planning orchestrator for external planner engines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a planning problem with one or more planners
    Solve(SolveArgs),

    /// List registered planners and which are available on this system
    Planners(PlannersArgs),
}

#[derive(Parser, Clone)]
pub struct SolveArgs {
    /// PDDL domain description file
    pub domain: PathBuf,

    /// PDDL problem file
    pub problem: PathBuf,

    /// Planner to run (repeatable; defaults to the configured set)
    #[arg(short = 'p', long = "planner")]
    pub planners: Vec<String>,

    /// Wall-clock budget per planner job, in seconds
    #[arg(short = 't', long)]
    pub timeout: Option<f64>,

    /// Run the requested planners one after another instead of concurrently
    #[arg(short = 's', long)]
    pub sequential: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Root directory for per-job workspaces
    #[arg(long)]
    pub workspace_root: Option<PathBuf>,

    /// Path to config file
    #[arg(long, default_value = "polyplan.yaml")]
    pub config: PathBuf,
}

#[derive(Parser, Clone)]
pub struct PlannersArgs {
    /// Path to config file
    #[arg(long, default_value = "polyplan.yaml")]
    pub config: PathBuf,
}
