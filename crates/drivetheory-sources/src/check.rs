//! Consistency check of a source against a topic catalog.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use drivetheory_core::catalog::TopicInfo;
use drivetheory_core::traits::QuizSource;

/// Outcome of loading one catalog topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The quiz loaded and its question count matches the catalog.
    Ok { questions: usize },
    /// The quiz loaded but holds a different number of questions.
    Mismatch { expected: usize, found: usize },
    /// The quiz could not be loaded.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCheck {
    pub topic_id: String,
    pub title: String,
    pub status: CheckStatus,
}

impl TopicCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, CheckStatus::Ok { .. })
    }
}

/// Load every topic concurrently, at most `parallelism` at a time, and
/// compare its question count with the catalog. Results keep catalog order.
pub async fn check_topics(
    source: Arc<dyn QuizSource>,
    topics: &[TopicInfo],
    parallelism: usize,
) -> Vec<TopicCheck> {
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut futures = FuturesUnordered::new();

    for (position, topic) in topics.iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let topic = topic.clone();

        futures.push(async move {
            let status = match semaphore.acquire_owned().await {
                Ok(_permit) => match source.load_quiz(&topic.id).await {
                    Ok(quiz) if quiz.questions.len() == topic.questions_count => {
                        CheckStatus::Ok {
                            questions: quiz.questions.len(),
                        }
                    }
                    Ok(quiz) => {
                        tracing::warn!(
                            topic = %topic.id,
                            expected = topic.questions_count,
                            found = quiz.questions.len(),
                            "question count differs from catalog"
                        );
                        CheckStatus::Mismatch {
                            expected: topic.questions_count,
                            found: quiz.questions.len(),
                        }
                    }
                    Err(e) => {
                        tracing::error!("failed to load topic {}: {e}", topic.id);
                        CheckStatus::Failed(e.to_string())
                    }
                },
                Err(_) => CheckStatus::Failed("semaphore closed".into()),
            };
            (
                position,
                TopicCheck {
                    topic_id: topic.id,
                    title: topic.title,
                    status,
                },
            )
        });
    }

    let mut checks = Vec::with_capacity(futures.len());
    while let Some(entry) = futures.next().await {
        checks.push(entry);
    }
    checks.sort_by_key(|(position, _)| *position);
    checks.into_iter().map(|(_, check)| check).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use drivetheory_core::model::{Answer, Question, QuizData};

    fn quiz(len: usize) -> QuizData {
        QuizData::new(
            (0..len)
                .map(|i| Question {
                    index: i.to_string(),
                    text: format!("Q{i}"),
                    points: "1".into(),
                    page_num: None,
                    image: None,
                    video: None,
                    answers: vec![Answer {
                        text: Some("a".into()),
                        image: None,
                        checked: true,
                    }],
                })
                .collect(),
        )
    }

    fn topic(id: &str, count: usize) -> TopicInfo {
        TopicInfo {
            id: id.into(),
            title: format!("Topic {id}"),
            link: String::new(),
            last_updated: String::new(),
            questions_count: count,
        }
    }

    #[tokio::test]
    async fn reports_each_topic_in_catalog_order() {
        let mock = Arc::new(
            MockSource::new()
                .with_quiz("1", quiz(3))
                .with_quiz("2", quiz(2)),
        );
        let topics = vec![topic("1", 3), topic("2", 5), topic("3", 1)];

        let checks = check_topics(mock.clone(), &topics, 2).await;

        assert_eq!(mock.call_count(), 3);
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].status, CheckStatus::Ok { questions: 3 });
        assert_eq!(
            checks[1].status,
            CheckStatus::Mismatch {
                expected: 5,
                found: 2
            }
        );
        assert!(matches!(checks[2].status, CheckStatus::Failed(_)));
        assert!(checks[0].is_ok() && !checks[1].is_ok());
    }

    #[tokio::test]
    async fn zero_parallelism_still_runs() {
        let mock = Arc::new(MockSource::new().with_quiz("1", quiz(1)));
        let checks = check_topics(mock.clone(), &[topic("1", 1)], 0).await;
        assert!(checks[0].is_ok());
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.last_topic().as_deref(), Some("1"));
    }
}
