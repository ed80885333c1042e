use crate::error::WorkspaceError;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DOMAIN_FILE: &str = "domain.pddl";
pub const PROBLEM_FILE: &str = "problem.pddl";
pub const RESULT_FILE: &str = "plan";

/// Allocates one isolated working directory per planner invocation.
///
/// Directories are named from a UTC timestamp plus the planner identifier so
/// that no two concurrently running jobs can collide, and are left in place
/// after the run for post-mortem inspection.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn default_root() -> PathBuf {
        std::env::temp_dir().join("polyplan")
    }

    pub fn create(&self, planner_id: &str) -> Result<Workspace, WorkspaceError> {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S%.6f");
        let dir = self
            .root
            .join(format!("{}_{}", stamp, planner_id.to_lowercase()));

        fs::create_dir_all(&self.root).map_err(|source| WorkspaceError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        // create_dir (not create_dir_all) so an existing directory is an
        // error: a workspace is exclusively owned by one job.
        fs::create_dir(&dir).map_err(|source| WorkspaceError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        debug!("Created workspace {:?}", dir);
        Ok(Workspace { dir })
    }
}

/// An exclusively-owned working directory for one planner job.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

/// The artifact paths handed to an adapter for building its command line.
#[derive(Debug, Clone)]
pub struct JobPaths {
    pub domain: PathBuf,
    pub problem: PathBuf,
    pub result: PathBuf,
}

impl Workspace {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the domain and problem files and reserve (but do not create)
    /// the result path.
    ///
    /// The domain file is the domain description followed by the
    /// action/effect description, each newline-terminated.
    pub fn write_artifacts(
        &self,
        domain: &str,
        actions: &str,
        problem: &str,
    ) -> Result<JobPaths, WorkspaceError> {
        let domain_path = self.dir.join(DOMAIN_FILE);
        let mut blob = String::with_capacity(domain.len() + actions.len() + 2);
        push_terminated(&mut blob, domain);
        push_terminated(&mut blob, actions);
        write_file(&domain_path, &blob)?;

        let problem_path = self.dir.join(PROBLEM_FILE);
        let mut blob = String::with_capacity(problem.len() + 1);
        push_terminated(&mut blob, problem);
        write_file(&problem_path, &blob)?;

        Ok(JobPaths {
            domain: domain_path,
            problem: problem_path,
            result: self.dir.join(RESULT_FILE),
        })
    }
}

fn push_terminated(blob: &mut String, text: &str) {
    blob.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        blob.push('\n');
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), WorkspaceError> {
    fs::write(path, content).map_err(|source| WorkspaceError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}
