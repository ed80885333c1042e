mod arvand_herd;
mod fast_downward;
mod lama;
mod randward;
mod uniform;

pub use arvand_herd::ArvandHerd;
pub use fast_downward::FastDownward;
pub use lama::Lama;
pub use randward::Randward;
pub use uniform::Uniform;

use crate::error::JobError;
use crate::job::{resolve_executable, run_job, JobSpec, ResultSpec};
use crate::plan::PlanCandidates;
use crate::workspace::{JobPaths, WorkspaceManager};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Mapping from planner name to its adapter; populated once at orchestrator
/// construction and read-only thereafter. Keys are case-sensitive and
/// exactly the adapter's declared name.
pub type PlannerRegistry = BTreeMap<String, Arc<dyn PlannerAdapter>>;

/// One external planning tool.
///
/// Adapters differ only in three facts: the command-line shape, the
/// result-file spec, and the disposable-byproduct list. They hold no
/// mutable state and are safe to invoke concurrently; each call gets its
/// own workspace.
#[async_trait]
pub trait PlannerAdapter: Send + Sync {
    /// Stable identifier, used as registry key and in result pairs.
    fn name(&self) -> &'static str;

    /// Name of the tool's execution script/runnable.
    fn executable(&self) -> &'static str;

    /// Arguments for the tool, built from the workspace artifact paths.
    fn command(&self, paths: &JobPaths) -> Vec<String>;

    fn result_spec(&self) -> ResultSpec;

    fn byproducts(&self) -> Vec<String> {
        Vec::new()
    }

    /// Create plan candidates for the given planning problem.
    ///
    /// There is no priority in the order of candidates.
    async fn plan(
        &self,
        workspaces: &WorkspaceManager,
        problem: &str,
        actions: &str,
        domain: &str,
        timeout: Duration,
    ) -> Result<PlanCandidates, JobError> {
        // Fail before paying any workspace cost if the tool is missing.
        if resolve_executable(self.executable()).is_none() {
            return Err(JobError::ExecutableNotFound(self.executable().to_string()));
        }

        let workspace = workspaces.create(self.name())?;
        let paths = workspace.write_artifacts(domain, actions, problem)?;

        let spec = JobSpec {
            program: self.executable().to_string(),
            args: self.command(&paths),
            results: self.result_spec(),
            byproducts: self.byproducts(),
            timeout,
        };

        run_job(&spec, &workspace).await
    }
}

/// Build the registry of bundled planner adapters.
pub fn default_registry() -> PlannerRegistry {
    let adapters: Vec<Arc<dyn PlannerAdapter>> = vec![
        Arc::new(Lama),
        Arc::new(FastDownward),
        Arc::new(ArvandHerd),
        Arc::new(Randward),
        Arc::new(Uniform),
    ];

    adapters
        .into_iter()
        .map(|adapter| (adapter.name().to_string(), adapter))
        .collect()
}

/// Standard `domain problem result` argument order shared by the planner
/// wrapper scripts.
pub(crate) fn standard_args(paths: &JobPaths) -> Vec<String> {
    vec![
        paths.domain.display().to_string(),
        paths.problem.display().to_string(),
        paths.result.display().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_keys_match_adapter_names() {
        let registry = default_registry();
        assert_eq!(registry.len(), 5);
        for (key, adapter) in &registry {
            assert_eq!(key, adapter.name());
        }
    }

    #[test]
    fn test_registry_contains_expected_fleet() {
        let registry = default_registry();
        for name in ["LAMA", "FD", "ARVANDHERD", "RANDWARD", "UNIFORM"] {
            assert!(registry.contains_key(name), "missing {}", name);
        }
    }
}
