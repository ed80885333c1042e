use super::{standard_args, PlannerAdapter};
use crate::job::ResultSpec;
use crate::workspace::JobPaths;

/// Interface to the Fast Downward planner.
pub struct FastDownward;

impl PlannerAdapter for FastDownward {
    fn name(&self) -> &'static str {
        "FD"
    }

    fn executable(&self) -> &'static str {
        "fd-planner"
    }

    fn command(&self, paths: &JobPaths) -> Vec<String> {
        standard_args(paths)
    }

    fn result_spec(&self) -> ResultSpec {
        ResultSpec::Single("plan".to_string())
    }

    fn byproducts(&self) -> Vec<String> {
        ["output", "output.sas"].map(String::from).to_vec()
    }
}
