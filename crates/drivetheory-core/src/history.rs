//! Quiz attempt history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::scoring::QuizSummary;
use crate::store::{load_collection, save_collection, KeyValueStore, HISTORY_KEY};

/// A completed attempt. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHistoryItem {
    pub topic_id: String,
    /// When the attempt was recorded.
    pub date: DateTime<Utc>,
    pub summary: QuizSummary,
}

/// Owns the newest-first list of past attempts and writes it through to the
/// store after every change.
pub struct HistoryTracker<S> {
    store: S,
    items: Vec<QuizHistoryItem>,
}

impl<S: KeyValueStore> HistoryTracker<S> {
    /// Load history from `store`. Unreadable or corrupt state is logged and
    /// replaced by an empty history.
    pub fn load(store: S) -> Self {
        let items: Vec<QuizHistoryItem> = load_collection(&store, HISTORY_KEY);
        tracing::debug!(count = items.len(), "loaded quiz history");
        Self { store, items }
    }

    /// All attempts, newest first.
    pub fn items(&self) -> &[QuizHistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record a finished attempt at the front of the history.
    pub fn record(&mut self, topic_id: &str, summary: QuizSummary) -> Result<(), StoreError> {
        self.items.insert(
            0,
            QuizHistoryItem {
                topic_id: topic_id.to_string(),
                date: Utc::now(),
                summary,
            },
        );
        tracing::debug!(topic_id, earned = summary.earned_points, "recorded attempt");
        self.persist()
    }

    /// Drop every attempt.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.persist()
    }

    /// Attempts for one topic, newest first.
    pub fn by_topic(&self, topic_id: &str) -> Vec<&QuizHistoryItem> {
        self.items
            .iter()
            .filter(|item| item.topic_id == topic_id)
            .collect()
    }

    /// The attempt with the highest earned/total ratio for a topic. Ties go
    /// to the most recent attempt.
    pub fn best_for_topic(&self, topic_id: &str) -> Option<&QuizHistoryItem> {
        self.by_topic(topic_id)
            .into_iter()
            .reduce(|best, current| {
                if current.summary.ratio() > best.summary.ratio() {
                    current
                } else {
                    best
                }
            })
    }

    fn persist(&self) -> Result<(), StoreError> {
        save_collection(&self.store, HISTORY_KEY, &self.items)
    }
}
