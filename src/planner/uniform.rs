use super::{standard_args, PlannerAdapter};
use crate::job::ResultSpec;
use crate::workspace::JobPaths;

/// Interface to the Uniform planner.
pub struct Uniform;

impl PlannerAdapter for Uniform {
    fn name(&self) -> &'static str {
        "UNIFORM"
    }

    fn executable(&self) -> &'static str {
        "uniform-planner"
    }

    fn command(&self, paths: &JobPaths) -> Vec<String> {
        standard_args(paths)
    }

    fn result_spec(&self) -> ResultSpec {
        ResultSpec::Single("plan".to_string())
    }

    fn byproducts(&self) -> Vec<String> {
        ["output", "output.sas", "all.groups", "test.groups"]
            .map(String::from)
            .to_vec()
    }
}
