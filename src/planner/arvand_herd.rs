use super::{standard_args, PlannerAdapter};
use crate::job::ResultSpec;
use crate::workspace::JobPaths;

/// Interface to the ArvandHerd portfolio planner.
///
/// Runs several configurations in parallel internally and emits a numbered
/// result file per plan found.
pub struct ArvandHerd;

impl PlannerAdapter for ArvandHerd {
    fn name(&self) -> &'static str {
        "ARVANDHERD"
    }

    fn executable(&self) -> &'static str {
        "arvand-herd-planner"
    }

    fn command(&self, paths: &JobPaths) -> Vec<String> {
        standard_args(paths)
    }

    fn result_spec(&self) -> ResultSpec {
        ResultSpec::Patterns(vec!["plan*".to_string()])
    }

    fn byproducts(&self) -> Vec<String> {
        ["output", "output.sas"].map(String::from).to_vec()
    }
}
