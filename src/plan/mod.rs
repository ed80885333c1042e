mod parser;

pub use parser::parse_plan;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One ground action of a plan: an operator label plus its argument tokens.
///
/// Corresponds to a single `(operator arg0 arg1 ...)` line of a result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub operator: String,
    pub arguments: Vec<String>,
}

impl PlanStep {
    pub fn new<S, I, T>(operator: S, arguments: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            operator: operator.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.operator)?;
        for arg in &self.arguments {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

/// An ordered sequence of plan steps; insertion order is execution order.
///
/// The `Display` rendering (one step per line) is the inverse of
/// [`parse_plan`] for well-formed input, modulo whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// The plans one planner produced for one request.
///
/// Order carries no priority; callers must not assume the first is "best".
pub type PlanCandidates = Vec<Plan>;

/// One planner's contribution to an aggregated batch: its name plus the
/// representative plan (by convention the first candidate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub planner: String,
    pub plan: Plan,
}

/// One entry per planner that completed without a fatal error. Reflects
/// completion order in concurrent mode, iteration order in sequential mode.
pub type PlanResultList = Vec<PlanResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display() {
        let step = PlanStep::new("move", ["b1", "l1", "l2"]);
        assert_eq!(step.to_string(), "(move b1 l1 l2)");
    }

    #[test]
    fn test_step_display_no_arguments() {
        let step = PlanStep::new("noop", Vec::<String>::new());
        assert_eq!(step.to_string(), "(noop)");
    }

    #[test]
    fn test_plan_display_one_step_per_line() {
        let plan = Plan::new(vec![
            PlanStep::new("move", ["b1", "l1", "l2"]),
            PlanStep::new("pick", ["b1", "l2"]),
        ]);
        assert_eq!(plan.to_string(), "(move b1 l1 l2)\n(pick b1 l2)");
    }

    #[test]
    fn test_empty_plan_display() {
        assert_eq!(Plan::default().to_string(), "");
    }

    #[test]
    fn test_plan_result_serializes() {
        let result = PlanResult {
            planner: "LAMA".to_string(),
            plan: Plan::new(vec![PlanStep::new("pick", ["b1", "l2"])]),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"planner\":\"LAMA\""));
        assert!(json.contains("\"operator\":\"pick\""));
    }
}
