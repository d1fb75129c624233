//! Quiz source backed by a local data directory.
//!
//! Layout:
//!
//! ```text
//! <root>/topic-<id>.json
//! <root>/topics.json            (optional catalog)
//! <root>/resources/index.json
//! <root>/resources/<id>.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use drivetheory_core::catalog::TopicInfo;
use drivetheory_core::error::SourceError;
use drivetheory_core::model::QuizData;
use drivetheory_core::resource::{Resource, ResourceIndex};
use drivetheory_core::traits::{
    is_safe_id, quiz_file_name, resource_path, QuizSource, RESOURCE_INDEX_PATH, TOPICS_PATH,
};

use crate::resource_from_index;

/// Reads quiz data from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, SourceError> {
        let path = self.root.join(relative);
        debug!(path = %path.display(), "reading");
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(path.display().to_string()));
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            what: path.display().to_string(),
            source,
        })
    }
}

#[async_trait]
impl QuizSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn load_quiz(&self, topic_id: &str) -> Result<QuizData, SourceError> {
        if !is_safe_id(topic_id) {
            return Err(SourceError::NotFound(format!("topic {topic_id}")));
        }
        self.read_json(&quiz_file_name(topic_id)).await
    }

    async fn load_topics(&self) -> Result<Option<Vec<TopicInfo>>, SourceError> {
        match self.read_json(TOPICS_PATH).await {
            Ok(topics) => Ok(Some(topics)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load_resource_index(&self) -> Result<ResourceIndex, SourceError> {
        self.read_json(RESOURCE_INDEX_PATH).await
    }

    #[instrument(skip(self))]
    async fn load_resource(&self, id: &str) -> Result<Resource, SourceError> {
        let index = self.load_resource_index().await?;
        if !is_safe_id(id) || index.get(id).is_none() {
            return Err(SourceError::NotFound(format!("resource {id}")));
        }
        let data = self.read_json(&resource_path(id)).await?;
        resource_from_index(&index, id, data)
    }
}
