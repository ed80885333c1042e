use crate::error::PlanningError;
use crate::job::resolve_executable;
use crate::plan::{PlanCandidates, PlanResult, PlanResultList};
use crate::planner::{default_registry, PlannerAdapter, PlannerRegistry};
use crate::workspace::WorkspaceManager;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fans one planning request out to a set of registered planner adapters
/// and aggregates their results, isolating per-planner failures.
///
/// The registry is immutable after construction; the domain and action
/// description maps are filled by the caller before planning.
pub struct Orchestrator {
    registry: PlannerRegistry,
    workspaces: WorkspaceManager,
    domains: BTreeMap<String, String>,
    actions: BTreeMap<String, String>,
}

impl Orchestrator {
    pub fn new(workspaces: WorkspaceManager) -> Self {
        Self::with_registry(default_registry(), workspaces)
    }

    pub fn with_registry(registry: PlannerRegistry, workspaces: WorkspaceManager) -> Self {
        Self {
            registry,
            workspaces,
            domains: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    pub fn set_domain_description(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.domains.insert(id.into(), text.into());
    }

    pub fn set_action_description(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.actions.insert(id.into(), text.into());
    }

    pub fn registry(&self) -> &PlannerRegistry {
        &self.registry
    }

    /// Names of all registered planners.
    pub fn planner_names(&self) -> BTreeSet<String> {
        self.registry.keys().cloned().collect()
    }

    /// Registered planners whose executable currently resolves on PATH.
    pub fn available_planners(&self) -> BTreeSet<String> {
        self.registry
            .iter()
            .filter(|(_, adapter)| resolve_executable(adapter.executable()).is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Run the requested planners against the prepared domain and the given
    /// problem, each under the shared timeout.
    ///
    /// Unknown names fail the whole batch before any job starts. Past
    /// validation the call always returns: a planner job that fails only
    /// drops that planner from the result list.
    pub async fn plan(
        &self,
        problem: &str,
        planner_names: &BTreeSet<String>,
        sequential: bool,
        timeout: Duration,
    ) -> Result<PlanResultList, PlanningError> {
        // Resolve the whole batch eagerly; nothing runs on a bad name.
        let mut selected: Vec<(String, Arc<dyn PlannerAdapter>)> =
            Vec::with_capacity(planner_names.len());
        for name in planner_names {
            match self.registry.get(name) {
                Some(adapter) => selected.push((name.clone(), adapter.clone())),
                None => return Err(PlanningError::UnknownPlanner(name.clone())),
            }
        }

        let domain = join_descriptions(&self.domains);
        let actions = join_descriptions(&self.actions);

        info!(
            "Running {} planner(s) {} with a {:?} budget each",
            selected.len(),
            if sequential { "sequentially" } else { "concurrently" },
            timeout
        );

        let mut results = PlanResultList::new();

        if sequential {
            for (name, adapter) in selected {
                let outcome = adapter
                    .plan(&self.workspaces, problem, &actions, &domain, timeout)
                    .await;
                collect(&mut results, &name, outcome.map_err(|e| e.to_string()));
            }
        } else {
            let mut workers = FuturesUnordered::new();
            for (name, adapter) in selected {
                let workspaces = self.workspaces.clone();
                let problem = problem.to_string();
                let actions = actions.clone();
                let domain = domain.clone();

                workers.push(tokio::spawn(async move {
                    let outcome = adapter
                        .plan(&workspaces, &problem, &actions, &domain, timeout)
                        .await;
                    (name, outcome)
                }));
            }

            // Single-writer aggregation: only this loop touches the result
            // list, in worker completion order.
            while let Some(joined) = workers.next().await {
                match joined {
                    Ok((name, outcome)) => {
                        collect(&mut results, &name, outcome.map_err(|e| e.to_string()))
                    }
                    Err(e) => warn!("Planner task panicked: {}", e),
                }
            }
        }

        Ok(results)
    }
}

/// Concatenate the registered description blobs in map order.
fn join_descriptions(descriptions: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for text in descriptions.values() {
        out.push_str(text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Fold one planner's outcome into the shared result list. Execution
/// failures are logged and absorbed; a successful planner contributes its
/// first candidate as the representative plan.
fn collect(results: &mut PlanResultList, name: &str, outcome: Result<PlanCandidates, String>) {
    match outcome {
        Ok(mut candidates) => {
            if candidates.is_empty() {
                // Success contract guarantees at least one candidate.
                warn!("Planner {} reported success without candidates", name);
                return;
            }
            let plan = candidates.swap_remove(0);
            debug!(
                "Planner {} produced {} candidate(s); representative has {} step(s)",
                name,
                candidates.len() + 1,
                plan.len()
            );
            if plan.is_empty() {
                debug!("Planner {} returned an empty plan", name);
            }
            results.push(PlanResult {
                planner: name.to_string(),
                plan,
            });
        }
        Err(e) => warn!("Planner {} failed: {}", name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use crate::job::ResultSpec;
    use crate::plan::{Plan, PlanStep};
    use crate::workspace::JobPaths;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use tokio::time::sleep;

    enum StubOutcome {
        Plan(Vec<PlanStep>),
        TimeOut,
    }

    struct StubPlanner {
        name: &'static str,
        delay: Duration,
        outcome: StubOutcome,
        invocations: AtomicUsize,
    }

    impl StubPlanner {
        fn succeeding(name: &'static str, delay: Duration) -> Self {
            Self {
                name,
                delay,
                outcome: StubOutcome::Plan(vec![
                    PlanStep::new("move", ["b1", "l1", "l2"]),
                    PlanStep::new("pick", ["b1", "l2"]),
                ]),
                invocations: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str, delay: Duration) -> Self {
            Self {
                name,
                delay,
                outcome: StubOutcome::TimeOut,
                invocations: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlannerAdapter for StubPlanner {
        fn name(&self) -> &'static str {
            self.name
        }

        fn executable(&self) -> &'static str {
            "sh"
        }

        fn command(&self, _paths: &JobPaths) -> Vec<String> {
            Vec::new()
        }

        fn result_spec(&self) -> ResultSpec {
            ResultSpec::Single("plan".to_string())
        }

        async fn plan(
            &self,
            _workspaces: &WorkspaceManager,
            _problem: &str,
            _actions: &str,
            _domain: &str,
            timeout: Duration,
        ) -> Result<PlanCandidates, JobError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            sleep(self.delay).await;
            match &self.outcome {
                StubOutcome::Plan(steps) => Ok(vec![Plan::new(steps.clone())]),
                StubOutcome::TimeOut => Err(JobError::Timeout(timeout)),
            }
        }
    }

    fn orchestrator_with(
        root: &TempDir,
        adapters: Vec<Arc<dyn PlannerAdapter>>,
    ) -> Orchestrator {
        let registry: PlannerRegistry = adapters
            .into_iter()
            .map(|a| (a.name().to_string(), a))
            .collect();
        let mut orchestrator =
            Orchestrator::with_registry(registry, WorkspaceManager::new(root.path()));
        orchestrator.set_domain_description("test-domain", "(define (domain d))");
        orchestrator
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_unknown_planner_fails_before_any_side_effect() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![Arc::new(StubPlanner::succeeding("A", Duration::ZERO))],
        );

        let err = orchestrator
            .plan("(problem)", &names(&["A", "NOPE"]), false, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("unknown planner '"));
        assert!(err.to_string().contains("NOPE"));
        // No workspace was created and no adapter ran.
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_planner_is_omitted_not_fatal() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::ZERO)),
                Arc::new(StubPlanner::failing("B", Duration::from_millis(50))),
            ],
        );

        let results = orchestrator
            .plan("(problem)", &names(&["A", "B"]), false, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].planner, "A");
        assert_eq!(results[0].plan.to_string(), "(move b1 l1 l2)\n(pick b1 l2)");
    }

    #[tokio::test]
    async fn test_every_planner_failing_yields_empty_list_not_error() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::failing("A", Duration::ZERO)),
                Arc::new(StubPlanner::failing("B", Duration::ZERO)),
            ],
        );

        let results = orchestrator
            .plan("(problem)", &names(&["A", "B"]), false, Duration::from_secs(5))
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_request_names_collapse_to_one_job() {
        let root = TempDir::new().unwrap();
        let stub = Arc::new(StubPlanner::succeeding("X", Duration::ZERO));
        let orchestrator = orchestrator_with(&root, vec![stub.clone()]);

        let requested = names(&["X", "X"]);
        assert_eq!(requested.len(), 1);

        let results = orchestrator
            .plan("(problem)", &requested, false, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(stub.invocations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_result_never_names_unrequested_planner() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::ZERO)),
                Arc::new(StubPlanner::succeeding("B", Duration::ZERO)),
            ],
        );

        let results = orchestrator
            .plan("(problem)", &names(&["A"]), false, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|r| r.planner == "A"));
    }

    #[tokio::test]
    async fn test_concurrent_results_arrive_in_completion_order() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::from_millis(200))),
                Arc::new(StubPlanner::succeeding("B", Duration::from_millis(10))),
            ],
        );

        let results = orchestrator
            .plan("(problem)", &names(&["A", "B"]), false, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].planner, "B");
        assert_eq!(results[1].planner, "A");
    }

    #[tokio::test]
    async fn test_sequential_results_follow_request_order() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::from_millis(100))),
                Arc::new(StubPlanner::succeeding("B", Duration::from_millis(10))),
            ],
        );

        let results = orchestrator
            .plan("(problem)", &names(&["A", "B"]), true, Duration::from_secs(5))
            .await
            .unwrap();

        // BTreeSet iteration order, regardless of individual duration.
        assert_eq!(results[0].planner, "A");
        assert_eq!(results[1].planner, "B");
    }

    #[tokio::test]
    async fn test_concurrent_wall_time_tracks_slowest_not_sum() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::from_millis(150))),
                Arc::new(StubPlanner::succeeding("B", Duration::from_millis(150))),
            ],
        );

        let start = std::time::Instant::now();
        let results = orchestrator
            .plan("(problem)", &names(&["A", "B"]), false, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_sequential_wall_time_tracks_sum() {
        let root = TempDir::new().unwrap();
        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("A", Duration::from_millis(150))),
                Arc::new(StubPlanner::succeeding("B", Duration::from_millis(150))),
            ],
        );

        let start = std::time::Instant::now();
        orchestrator
            .plan("(problem)", &names(&["A", "B"]), true, Duration::from_secs(5))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_available_planners_probes_path() {
        let root = TempDir::new().unwrap();

        struct MissingTool;
        #[async_trait]
        impl PlannerAdapter for MissingTool {
            fn name(&self) -> &'static str {
                "MISSING"
            }
            fn executable(&self) -> &'static str {
                "polyplan-no-such-tool"
            }
            fn command(&self, _paths: &JobPaths) -> Vec<String> {
                Vec::new()
            }
            fn result_spec(&self) -> ResultSpec {
                ResultSpec::Single("plan".to_string())
            }
        }

        let orchestrator = orchestrator_with(
            &root,
            vec![
                Arc::new(StubPlanner::succeeding("SH", Duration::ZERO)),
                Arc::new(MissingTool),
            ],
        );

        let available = orchestrator.available_planners();
        assert!(available.contains("SH"));
        assert!(!available.contains("MISSING"));
        assert_eq!(orchestrator.planner_names().len(), 2);
    }
}
