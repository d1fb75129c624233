//! drivetheory-sources: where quizzes come from.
//!
//! Implements the `QuizSource` trait for a local data directory, a static
//! HTTP host and an in-memory mock, plus the TOML configuration that picks
//! one of them.

pub mod check;
pub mod config;
pub mod directory;
pub mod http;
pub mod mock;

pub use check::{check_topics, CheckStatus, TopicCheck};
pub use config::{create_source, load_config, DrivetheoryConfig, SourceConfig};
pub use directory::DirectorySource;
pub use http::HttpSource;
pub use mock::MockSource;

use drivetheory_core::error::SourceError;
use drivetheory_core::resource::{Resource, ResourceIndex};
use serde_json::Value;

/// Parse a fetched resource document using the type recorded in the index.
pub(crate) fn resource_from_index(
    index: &ResourceIndex,
    id: &str,
    data: Value,
) -> Result<Resource, SourceError> {
    let entry = index
        .get(id)
        .ok_or_else(|| SourceError::NotFound(format!("resource {id}")))?;
    Resource::parse(entry.kind, data).map_err(|source| SourceError::Parse {
        what: format!("resource {id}"),
        source,
    })
}
