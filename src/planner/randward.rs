use super::{standard_args, PlannerAdapter};
use crate::job::ResultSpec;
use crate::workspace::JobPaths;

/// Interface to the Randward planner.
pub struct Randward;

impl PlannerAdapter for Randward {
    fn name(&self) -> &'static str {
        "RANDWARD"
    }

    fn executable(&self) -> &'static str {
        "randward-planner"
    }

    fn command(&self, paths: &JobPaths) -> Vec<String> {
        standard_args(paths)
    }

    fn result_spec(&self) -> ResultSpec {
        // Randward names intermediate improvements after itself next to the
        // final result file.
        ResultSpec::Patterns(vec!["plan*".to_string(), "randward*".to_string()])
    }

    fn byproducts(&self) -> Vec<String> {
        ["output", "output.sas", "all.groups", "test.groups"]
            .map(String::from)
            .to_vec()
    }
}
