use std::path::PathBuf;
use thiserror::Error;

/// Validation errors raised before any planner job starts.
///
/// These are the only errors that cross the orchestrator boundary; per-job
/// execution errors are absorbed into the absence of a result.
#[derive(Error, Debug)]
pub enum PlanningError {
    // The "unknown planner '" prefix is a stable, machine-checkable marker;
    // callers key on it to offer the registered planner list.
    #[error("unknown planner '{0}'")]
    UnknownPlanner(String),
}

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to create workspace directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write artifact '{path}': {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures scoped to a single planner job.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Executable '{0}' not found on PATH")]
    ExecutableNotFound(String),

    #[error("Job timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("No result file yielded a parsable plan")]
    NoPlanProduced,

    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("Invalid result pattern '{pattern}': {source}")]
    ResultPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Line {0}: expected '(' to open a plan step")]
    MissingOpenParen(usize),

    #[error("Line {0}: unterminated plan step, missing ')'")]
    MissingCloseParen(usize),

    #[error("Line {0}: plan step has no operator label")]
    EmptyStep(usize),

    #[error("Line {0}: unexpected content after ')'")]
    TrailingContent(usize),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
