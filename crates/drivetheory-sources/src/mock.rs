//! Mock source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use drivetheory_core::catalog::TopicInfo;
use drivetheory_core::error::SourceError;
use drivetheory_core::model::QuizData;
use drivetheory_core::traits::{quiz_file_name, QuizSource};

/// An in-memory quiz source for exercising sessions and commands without
/// touching disk or network.
#[derive(Default)]
pub struct MockSource {
    /// Quizzes keyed by topic id.
    quizzes: HashMap<String, QuizData>,
    topics: Option<Vec<TopicInfo>>,
    /// Number of `load_quiz` calls made.
    call_count: AtomicU32,
    last_topic: Mutex<Option<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quiz(mut self, topic_id: &str, quiz: QuizData) -> Self {
        self.quizzes.insert(topic_id.to_string(), quiz);
        self
    }

    pub fn with_topics(mut self, topics: Vec<TopicInfo>) -> Self {
        self.topics = Some(topics);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Topic id of the most recent `load_quiz` call.
    pub fn last_topic(&self) -> Option<String> {
        self.last_topic
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl QuizSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load_quiz(&self, topic_id: &str) -> Result<QuizData, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_topic
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(topic_id.to_string());

        self.quizzes
            .get(topic_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(quiz_file_name(topic_id)))
    }

    async fn load_topics(&self) -> Result<Option<Vec<TopicInfo>>, SourceError> {
        Ok(self.topics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_quizzes() {
        let source = MockSource::new().with_quiz("1", QuizData::new(vec![]));

        assert!(source.load_quiz("1").await.is_ok());
        assert!(source.load_quiz("2").await.unwrap_err().is_not_found());
        assert_eq!(source.call_count(), 2);
        assert_eq!(source.last_topic().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn catalog_is_passed_through() {
        let source = MockSource::new();
        assert!(source.load_topics().await.unwrap().is_none());

        let source = source.with_topics(vec![TopicInfo {
            id: "3".into(),
            title: "Signals".into(),
            link: String::new(),
            last_updated: String::new(),
            questions_count: 0,
        }]);
        assert_eq!(source.load_topics().await.unwrap().unwrap().len(), 1);
    }
}
