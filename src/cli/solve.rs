use crate::cli::SolveArgs;
use crate::config::{Config, OutputFormat};
use crate::error::PlanningError;
use crate::orchestrator::Orchestrator;
use crate::workspace::WorkspaceManager;
use anyhow::Context;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::info;

pub async fn execute(args: SolveArgs) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if !args.planners.is_empty() {
        config.planners = args.planners.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_sec = timeout;
    }
    if args.sequential {
        config.sequential = true;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(root) = args.workspace_root {
        config.workspace_root = Some(root);
    }

    let domain_text = std::fs::read_to_string(&args.domain)
        .with_context(|| format!("Failed to read domain file {:?}", args.domain))?;
    let problem_text = std::fs::read_to_string(&args.problem)
        .with_context(|| format!("Failed to read problem file {:?}", args.problem))?;

    let mut orchestrator = Orchestrator::new(WorkspaceManager::new(config.workspace_root()));
    orchestrator.set_domain_description("cli-domain", domain_text);

    let requested: BTreeSet<String> = config.planners.iter().cloned().collect();
    let timeout = Duration::from_secs_f64(config.timeout_sec.max(0.0));

    info!(
        "Solving {:?} with planners {:?}",
        args.problem, requested
    );

    let results = match orchestrator
        .plan(&problem_text, &requested, config.sequential, timeout)
        .await
    {
        Ok(results) => results,
        Err(e @ PlanningError::UnknownPlanner(_)) => {
            eprintln!("Error: {}", e);
            eprintln!("Registered planners:");
            for name in orchestrator.planner_names() {
                eprintln!("    {}", name);
            }
            std::process::exit(1);
        }
    };

    match config.format {
        OutputFormat::Text => {
            if results.is_empty() {
                eprintln!("No planner produced a plan.");
            }
            for result in &results {
                println!("Planner {}:\n{}\n", result.planner, result.plan);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
