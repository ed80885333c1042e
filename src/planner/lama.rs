use super::{standard_args, PlannerAdapter};
use crate::job::ResultSpec;
use crate::workspace::JobPaths;

/// Interface to the LAMA planner.
///
/// LAMA searches anytime and writes one numbered result file per improved
/// plan it finds (`plan.1`, `plan.2`, ...), so its results are pattern
/// matched rather than a single fixed name.
pub struct Lama;

impl PlannerAdapter for Lama {
    fn name(&self) -> &'static str {
        "LAMA"
    }

    fn executable(&self) -> &'static str {
        "lama-planner"
    }

    fn command(&self, paths: &JobPaths) -> Vec<String> {
        standard_args(paths)
    }

    fn result_spec(&self) -> ResultSpec {
        ResultSpec::Patterns(vec!["plan*".to_string()])
    }

    fn byproducts(&self) -> Vec<String> {
        ["output", "output.sas", "all.groups", "test.groups"]
            .map(String::from)
            .to_vec()
    }
}
