use crate::cli::PlannersArgs;
use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::workspace::WorkspaceManager;

pub fn execute(args: PlannersArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let orchestrator = Orchestrator::new(WorkspaceManager::new(config.workspace_root()));

    let available = orchestrator.available_planners();

    println!("Registered planners:");
    for (name, adapter) in orchestrator.registry() {
        let marker = if available.contains(name) {
            " (available)"
        } else {
            ""
        };
        println!("    {} [{}]{}", name, adapter.executable(), marker);
    }

    Ok(())
}
