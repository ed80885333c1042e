use super::{Plan, PlanStep};
use crate::error::ParseError;

/// Parse the textual content of a planner result file.
///
/// One ground action per line in `(operator arg0 arg1 ...)` form. Blank
/// lines and `;` comment lines (e.g. the cost annotations some planners
/// append) are skipped.
pub fn parse_plan(input: &str) -> Result<Plan, ParseError> {
    let mut steps = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        steps.push(parse_step(line, idx + 1)?);
    }

    Ok(Plan::new(steps))
}

fn parse_step(line: &str, lineno: usize) -> Result<PlanStep, ParseError> {
    let rest = line
        .strip_prefix('(')
        .ok_or(ParseError::MissingOpenParen(lineno))?;

    let close = rest
        .find(')')
        .ok_or(ParseError::MissingCloseParen(lineno))?;

    if !rest[close + 1..].trim().is_empty() {
        return Err(ParseError::TrailingContent(lineno));
    }

    let mut tokens = rest[..close].split_whitespace();
    let operator = tokens.next().ok_or(ParseError::EmptyStep(lineno))?;

    Ok(PlanStep::new(operator, tokens))
}
