//! Core trait definitions for quiz data sources.
//!
//! Implemented by the `drivetheory-sources` crate (directory, HTTP and mock
//! sources).

use async_trait::async_trait;

use crate::catalog::TopicInfo;
use crate::error::SourceError;
use crate::model::QuizData;
use crate::resource::{Resource, ResourceIndex};

// ---------------------------------------------------------------------------
// Quiz source trait
// ---------------------------------------------------------------------------

/// Supplies quiz definitions and reference resources.
///
/// Sources are not expected to retry or cache; callers decide what to do with
/// a failure.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Human-readable source name (e.g. "directory").
    fn name(&self) -> &str;

    /// Load the quiz for a topic.
    async fn load_quiz(&self, topic_id: &str) -> Result<QuizData, SourceError>;

    /// Load a topic catalog published alongside the quizzes, if any.
    ///
    /// `Ok(None)` means the source has no catalog and the built-in one
    /// applies.
    async fn load_topics(&self) -> Result<Option<Vec<TopicInfo>>, SourceError> {
        Ok(None)
    }

    /// Load the resource index.
    async fn load_resource_index(&self) -> Result<ResourceIndex, SourceError> {
        Err(SourceError::NotFound("resource index".into()))
    }

    /// Load one resource document.
    async fn load_resource(&self, id: &str) -> Result<Resource, SourceError> {
        Err(SourceError::NotFound(format!("resource {id}")))
    }
}

// ---------------------------------------------------------------------------
// Path conventions
// ---------------------------------------------------------------------------

/// Relative path of a topic's quiz file, e.g. `topic-19.json`.
pub fn quiz_file_name(topic_id: &str) -> String {
    format!("topic-{topic_id}.json")
}

/// Relative path of the resource index.
pub const RESOURCE_INDEX_PATH: &str = "resources/index.json";

/// Relative path of a resource document.
pub fn resource_path(id: &str) -> String {
    format!("resources/{id}.json")
}

/// Relative path of an optional topic catalog.
pub const TOPICS_PATH: &str = "topics.json";

/// Reject identifiers that could escape the data root when used in a path.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
