use crate::error::ConfigError;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_planners() -> Vec<String> {
    vec!["LAMA".to_string()]
}

fn default_timeout_sec() -> f64 {
    7.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Optional `polyplan.yaml` settings; CLI flags override file values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Planners to run when the CLI names none.
    pub planners: Vec<String>,

    /// Wall-clock budget per planner job, in seconds.
    pub timeout_sec: f64,

    /// Run planners one after another instead of concurrently.
    pub sequential: bool,

    /// Root directory for per-job workspaces (default: system temp dir).
    pub workspace_root: Option<PathBuf>,

    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planners: default_planners(),
            timeout_sec: default_timeout_sec(),
            sequential: false,
            workspace_root: None,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn workspace_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(crate::workspace::WorkspaceManager::default_root)
    }
}
