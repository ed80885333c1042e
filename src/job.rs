use crate::error::JobError;
use crate::plan::{parse_plan, PlanCandidates};
use crate::workspace::{Workspace, DOMAIN_FILE, PROBLEM_FILE};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, warn};

/// Which workspace filenames constitute a job's results.
///
/// Anytime planners emit one numbered file per improved plan, so adapters
/// may declare glob patterns instead of a single fixed name.
#[derive(Debug, Clone)]
pub enum ResultSpec {
    Single(String),
    Patterns(Vec<String>),
}

/// Everything the job runner needs to execute one external planner once.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub program: String,
    pub args: Vec<String>,
    pub results: ResultSpec,
    pub byproducts: Vec<String>,
    pub timeout: Duration,
}

/// Resolve a program name against PATH, honoring explicit paths.
pub fn resolve_executable(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Execute one planner job against its workspace.
///
/// Spawns the command with the workspace as working directory, enforces the
/// wall-clock timeout with a forced kill, harvests the result files the
/// tool declared, and deletes known byproducts. A timed-out job's partial
/// result files are discarded as unreliable rather than parsed.
pub async fn run_job(spec: &JobSpec, workspace: &Workspace) -> Result<PlanCandidates, JobError> {
    if resolve_executable(&spec.program).is_none() {
        return Err(JobError::ExecutableNotFound(spec.program.clone()));
    }

    debug!(
        "Spawning '{}' with {} arg(s) in {:?}",
        spec.program,
        spec.args.len(),
        workspace.dir()
    );

    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .current_dir(workspace.dir())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let status = match tokio_timeout(spec.timeout, child.wait()).await {
        Ok(status) => status?,
        Err(_) => {
            if let Err(e) = child.start_kill() {
                warn!("Failed to kill '{}': {}", spec.program, e);
            }
            // Reap the child so it does not linger as a zombie.
            let _ = child.wait().await;
            return Err(JobError::Timeout(spec.timeout));
        }
    };

    if !status.success() {
        debug!("'{}' exited with {}", spec.program, status);
    }

    let result_set = build_result_set(&spec.results)?;
    let candidates = harvest(workspace.dir(), &spec.results, &result_set)?;
    if candidates.is_empty() {
        return Err(JobError::NoPlanProduced);
    }

    cleanup(workspace.dir(), &spec.byproducts, &result_set);
    Ok(candidates)
}

fn build_result_set(spec: &ResultSpec) -> Result<GlobSet, JobError> {
    let mut builder = GlobSetBuilder::new();
    let patterns: &[String] = match spec {
        ResultSpec::Single(name) => std::slice::from_ref(name),
        ResultSpec::Patterns(patterns) => patterns,
    };
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| JobError::ResultPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| JobError::ResultPattern {
            pattern: patterns.join(","),
            source,
        })
}

/// Collect and parse the result files the planner left in the workspace.
///
/// Each matching file is parsed independently; an unparsable file is
/// skipped with a warning rather than aborting the job.
fn harvest(
    dir: &Path,
    spec: &ResultSpec,
    result_set: &GlobSet,
) -> Result<PlanCandidates, JobError> {
    let mut files: Vec<PathBuf> = match spec {
        ResultSpec::Single(name) => {
            let path = dir.join(name);
            if path.is_file() {
                vec![path]
            } else {
                Vec::new()
            }
        }
        ResultSpec::Patterns(_) => std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .map(|name| result_set.is_match(Path::new(name)))
                    .unwrap_or(false)
            })
            .collect(),
    };
    files.sort();

    let mut candidates = PlanCandidates::new();
    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable result file {:?}: {}", file, e);
                continue;
            }
        };
        match parse_plan(&content) {
            Ok(plan) => candidates.push(plan),
            Err(e) => warn!("Skipping unparsable result file {:?}: {}", file, e),
        }
    }
    Ok(candidates)
}

/// Best-effort deletion of known byproduct files.
///
/// The input artifacts and anything matching the result spec are never
/// deleted here, whatever the adapter listed.
fn cleanup(dir: &Path, byproducts: &[String], result_set: &GlobSet) {
    for name in byproducts {
        if name == DOMAIN_FILE || name == PROBLEM_FILE || result_set.is_match(Path::new(name)) {
            warn!("Refusing to delete protected file '{}'", name);
            continue;
        }
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to delete byproduct {:?}: {}", path, e);
        }
    }
}
