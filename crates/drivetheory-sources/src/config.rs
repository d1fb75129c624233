//! Configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use drivetheory_core::traits::QuizSource;

use crate::directory::DirectorySource;
use crate::http::HttpSource;

/// Where quiz data is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Directory {
        #[serde(default = "default_data_dir")]
        path: PathBuf,
    },
    Http {
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory {
            path: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_timeout() -> u64 {
    30
}

/// Top-level drivetheory configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivetheoryConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Directory holding the persisted history and mistake deck.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Shuffle answer options when showing a question.
    #[serde(default)]
    pub randomize_answers: bool,
    /// Show how many options are correct next to each question.
    #[serde(default = "default_true")]
    pub show_correct_count: bool,
    /// Max topics loaded at once by `check`.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_state_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("drivetheory"),
        Err(_) => PathBuf::from("./.drivetheory"),
    }
}
fn default_true() -> bool {
    true
}
fn default_parallelism() -> usize {
    4
}

impl Default for DrivetheoryConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            state_dir: default_state_dir(),
            randomize_answers: false,
            show_correct_count: default_true(),
            parallelism: default_parallelism(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Directory { path } => SourceConfig::Directory {
            path: resolve_path(path),
        },
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Apply `DRIVETHEORY_STATE_DIR` and `DRIVETHEORY_DATA_DIR` overrides.
fn apply_env_overrides(config: &mut DrivetheoryConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup("DRIVETHEORY_STATE_DIR") {
        config.state_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("DRIVETHEORY_DATA_DIR") {
        config.source = SourceConfig::Directory {
            path: PathBuf::from(dir),
        };
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `drivetheory.toml` in the current directory
/// 2. `~/.config/drivetheory/config.toml`
pub fn load_config() -> Result<DrivetheoryConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrivetheoryConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("drivetheory.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrivetheoryConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrivetheoryConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config.source = resolve_source_config(&config.source);
    config.state_dir = resolve_path(&config.state_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drivetheory"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn QuizSource>> {
    match config {
        SourceConfig::Directory { path } => Ok(Arc::new(DirectorySource::new(path))),
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => {
            let source = HttpSource::with_timeout(base_url, *timeout_secs)
                .with_context(|| format!("failed to set up HTTP source for {base_url}"))?;
            Ok(Arc::new(source))
        }
    }
}
