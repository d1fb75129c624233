//! The mistake trainer deck.
//!
//! Questions enter the deck when they are missed in a regular quiz and leave
//! it once they have been answered correctly [`MASTERY_THRESHOLD`] times in a
//! row. Any miss resets the streak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{Question, QuizData};
use crate::store::{load_collection, save_collection, KeyValueStore, MISTAKES_KEY};

/// Consecutive correct answers needed to graduate a question from the deck.
pub const MASTERY_THRESHOLD: u32 = 4;

/// A deck entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeTrainerQuestion {
    pub question: Question,
    pub topic_id: String,
    /// Topic title at the time the mistake was made.
    pub topic_name: String,
    /// Current streak of correct answers.
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub date_added: DateTime<Utc>,
}

impl MistakeTrainerQuestion {
    fn record_miss(&mut self) {
        self.incorrect_count += 1;
        self.correct_count = 0;
    }

    /// Correct answers still needed before graduation.
    pub fn remaining(&self) -> u32 {
        MASTERY_THRESHOLD.saturating_sub(self.correct_count)
    }
}

/// Owns the newest-first deck of missed questions and writes it through to
/// the store after every change.
pub struct MistakeTrainer<S> {
    store: S,
    deck: Vec<MistakeTrainerQuestion>,
}

impl<S: KeyValueStore> MistakeTrainer<S> {
    /// Load the deck from `store`. Unreadable or corrupt state is logged and
    /// replaced by an empty deck.
    pub fn load(store: S) -> Self {
        let mut deck: Vec<MistakeTrainerQuestion> = load_collection(&store, MISTAKES_KEY);
        deck.retain(|entry| entry.correct_count < MASTERY_THRESHOLD);
        tracing::debug!(count = deck.len(), "loaded mistake deck");
        Self { store, deck }
    }

    /// Deck entries, newest first.
    pub fn entries(&self) -> &[MistakeTrainerQuestion] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Record that `question` from `topic_id` was missed in a regular quiz.
    ///
    /// An existing entry for the same question and topic keeps its place and
    /// loses its streak; otherwise a new entry goes to the front.
    pub fn add_mistake(
        &mut self,
        question: &Question,
        topic_id: &str,
        topic_name: &str,
    ) -> Result<(), StoreError> {
        match self
            .deck
            .iter_mut()
            .find(|m| m.question.index == question.index && m.topic_id == topic_id)
        {
            Some(existing) => {
                existing.record_miss();
                tracing::debug!(
                    index = %question.index,
                    topic_id,
                    incorrect = existing.incorrect_count,
                    "mistake repeated"
                );
            }
            None => {
                self.deck.insert(
                    0,
                    MistakeTrainerQuestion {
                        question: question.clone(),
                        topic_id: topic_id.to_string(),
                        topic_name: topic_name.to_string(),
                        correct_count: 0,
                        incorrect_count: 1,
                        date_added: Utc::now(),
                    },
                );
                tracing::debug!(index = %question.index, topic_id, "mistake added");
            }
        }
        self.persist()
    }

    /// Apply a drill answer to every entry whose question index matches, then
    /// drop entries that reached the mastery threshold.
    ///
    /// Matching ignores the topic, so two topics sharing an index move
    /// together.
    pub fn record_result(&mut self, question_index: &str, is_correct: bool) -> Result<(), StoreError> {
        for entry in self
            .deck
            .iter_mut()
            .filter(|m| m.question.index == question_index)
        {
            if is_correct {
                entry.correct_count += 1;
            } else {
                entry.record_miss();
            }
        }

        let before = self.deck.len();
        self.deck
            .retain(|entry| entry.correct_count < MASTERY_THRESHOLD);
        let graduated = before - self.deck.len();
        if graduated > 0 {
            tracing::info!(question_index, graduated, "question mastered");
        }
        self.persist()
    }

    /// Empty the deck.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.deck.clear();
        self.persist()
    }

    /// The deck's questions as a quiz, in deck order.
    pub fn build_quiz_view(&self) -> QuizData {
        QuizData::new(self.deck.iter().map(|m| m.question.clone()).collect())
    }

    fn persist(&self) -> Result<(), StoreError> {
        save_collection(&self.store, MISTAKES_KEY, &self.deck)
    }
}
