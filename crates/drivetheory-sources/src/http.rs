//! Quiz source fetching static JSON from a web host.
//!
//! Quizzes live under `<base>/data/`, resources under `<base>/resources/`.

use std::time::Duration;

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

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches quiz data over HTTP.
pub struct HttpSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, relative);
        debug!(%url, "fetching");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|source| SourceError::Parse { what: url, source })
    }
}

#[async_trait]
impl QuizSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn load_quiz(&self, topic_id: &str) -> Result<QuizData, SourceError> {
        if !is_safe_id(topic_id) {
            return Err(SourceError::NotFound(format!("topic {topic_id}")));
        }
        self.get_json(&format!("data/{}", quiz_file_name(topic_id)))
            .await
    }

    async fn load_topics(&self) -> Result<Option<Vec<TopicInfo>>, SourceError> {
        match self.get_json(&format!("data/{TOPICS_PATH}")).await {
            Ok(topics) => Ok(Some(topics)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load_resource_index(&self) -> Result<ResourceIndex, SourceError> {
        self.get_json(RESOURCE_INDEX_PATH).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn load_resource(&self, id: &str) -> Result<Resource, SourceError> {
        let index = self.load_resource_index().await?;
        if !is_safe_id(id) || index.get(id).is_none() {
            return Err(SourceError::NotFound(format!("resource {id}")));
        }
        let data = self.get_json(&resource_path(id)).await?;
        resource_from_index(&index, id, data)
    }
}
