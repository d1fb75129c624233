//! Resolved configuration, source and state shared by the commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use drivetheory_core::catalog::TopicCatalog;
use drivetheory_core::history::HistoryTracker;
use drivetheory_core::store::JsonFileStore;
use drivetheory_core::traits::QuizSource;
use drivetheory_core::trainer::MistakeTrainer;
use drivetheory_sources::config::load_config_from;
use drivetheory_sources::{create_source, DrivetheoryConfig, SourceConfig};

/// Global command-line flags. They take precedence over the config file and
/// the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

pub struct AppContext {
    pub config: DrivetheoryConfig,
    pub source: Arc<dyn QuizSource>,
    store: JsonFileStore,
}

impl AppContext {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut config = load_config_from(overrides.config.as_deref())?;
        if let Some(dir) = &overrides.state_dir {
            config.state_dir = dir.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            config.source = SourceConfig::Directory { path: dir.clone() };
        }

        let source = create_source(&config.source)?;
        tracing::debug!(
            source = source.name(),
            state_dir = %config.state_dir.display(),
            "context ready"
        );
        let store = JsonFileStore::new(&config.state_dir);

        Ok(Self {
            config,
            source,
            store,
        })
    }

    pub fn history(&self) -> HistoryTracker<JsonFileStore> {
        HistoryTracker::load(self.store.clone())
    }

    pub fn trainer(&self) -> MistakeTrainer<JsonFileStore> {
        MistakeTrainer::load(self.store.clone())
    }

    /// The source's own catalog when it publishes one, else the built-in one.
    pub async fn catalog(&self) -> TopicCatalog {
        match self.source.load_topics().await {
            Ok(Some(topics)) => TopicCatalog::new(topics),
            Ok(None) => TopicCatalog::builtin(),
            Err(e) => {
                tracing::warn!("failed to load topic catalog, using built-in: {e}");
                TopicCatalog::builtin()
            }
        }
    }
}
