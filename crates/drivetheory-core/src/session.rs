//! Quiz-taking sessions and recording their outcome.
//!
//! A [`QuizSession`] holds the per-question selections while a user works
//! through a quiz. Finishing grades it with [`crate::scoring::score`]; the
//! caller then hands the grading to [`record_attempt`] (regular quiz) or
//! [`record_drill`] (mistake trainer run).

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::error::StoreError;
use crate::history::HistoryTracker;
use crate::model::{Question, QuizData, UserSelection};
use crate::scoring::{score, GradedQuiz, Outcome};
use crate::store::KeyValueStore;
use crate::trainer::MistakeTrainer;

/// What kind of quiz a session is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    /// A regular quiz for one topic.
    Topic { topic_id: String, topic_name: String },
    /// A drill over the mistake trainer deck.
    Drill,
}

/// State of one quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    kind: SessionKind,
    quiz: QuizData,
    selections: Vec<UserSelection>,
    current: usize,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    graded: Option<GradedQuiz>,
}

impl QuizSession {
    pub fn new(kind: SessionKind, quiz: QuizData) -> Self {
        let selections = quiz
            .questions
            .iter()
            .map(|q| UserSelection::empty(q.answers.len()))
            .collect();
        Self {
            id: Uuid::new_v4(),
            kind,
            quiz,
            selections,
            current: 0,
            started_at: None,
            finished_at: None,
            graded: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &SessionKind {
        &self.kind
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn len(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.questions.is_empty()
    }

    /// Start the clock. Calling again keeps the first start time.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
            tracing::debug!(session = %self.id, questions = self.len(), "quiz started");
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn is_finished(&self) -> bool {
        self.graded.is_some()
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn current_selection(&self) -> Option<&UserSelection> {
        self.selections.get(self.current)
    }

    pub fn selections(&self) -> &[UserSelection] {
        &self.selections
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len()
    }

    /// Move forward. Returns `false` when already on the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.current += 1;
            true
        }
    }

    /// Move back. Returns `false` when already on the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            false
        } else {
            self.current -= 1;
            true
        }
    }

    /// Jump to a question. Out-of-range positions are ignored.
    pub fn go_to(&mut self, position: usize) -> bool {
        if position < self.len() {
            self.current = position;
            true
        } else {
            false
        }
    }

    /// Toggle answer `answer` (canonical position) of the current question.
    /// Ignored once the session is finished.
    pub fn toggle(&mut self, answer: usize) {
        if self.is_finished() {
            return;
        }
        if let Some(selection) = self.selections.get_mut(self.current) {
            selection.toggle(answer);
        }
    }

    /// Replace the current question's selection with the given canonical
    /// positions.
    pub fn select(&mut self, answers: &[usize]) {
        if self.is_finished() {
            return;
        }
        if let (Some(question), Some(selection)) = (
            self.quiz.questions.get(self.current),
            self.selections.get_mut(self.current),
        ) {
            *selection = UserSelection::from_positions(question.answers.len(), answers);
        }
    }

    /// Number of correct options of the current question.
    pub fn correct_count(&self) -> usize {
        self.current_question()
            .map(Question::correct_count)
            .unwrap_or(0)
    }

    /// Order in which to display the current question's answers, as canonical
    /// positions. Shuffled when `randomize` is set; selections always refer
    /// to canonical positions.
    pub fn display_order<R: Rng + ?Sized>(&self, randomize: bool, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self
            .current_question()
            .map(|q| q.answers.len())
            .unwrap_or(0))
            .collect();
        if randomize {
            order.shuffle(rng);
        }
        order
    }

    /// Stop the clock and grade the attempt. Finishing again returns the
    /// first grading unchanged.
    pub fn finish(&mut self) -> &GradedQuiz {
        let id = self.id;
        let quiz = &self.quiz;
        let selections = &self.selections;
        let started_at = self.started_at;
        let finished_at = &mut self.finished_at;

        self.graded.get_or_insert_with(|| {
            let now = Utc::now();
            *finished_at = Some(now);
            let graded = score(quiz, selections, started_at, Some(now));
            tracing::info!(
                session = %id,
                correct = graded.summary.correct_questions,
                total = graded.summary.total_questions,
                earned = graded.summary.earned_points,
                "quiz finished"
            );
            graded
        })
    }

    pub fn graded(&self) -> Option<&GradedQuiz> {
        self.graded.as_ref()
    }
}

/// Record a regular quiz attempt: append it to the history and put every
/// question that was not answered correctly into the mistake deck.
pub fn record_attempt<H, M>(
    history: &mut HistoryTracker<H>,
    trainer: &mut MistakeTrainer<M>,
    topic_id: &str,
    topic_name: &str,
    quiz: &QuizData,
    graded: &GradedQuiz,
) -> Result<usize, StoreError>
where
    H: KeyValueStore,
    M: KeyValueStore,
{
    history.record(topic_id, graded.summary)?;

    let mut missed = 0;
    for (question, result) in graded.pairs(quiz) {
        if result.outcome() != Outcome::Correct {
            trainer.add_mistake(question, topic_id, topic_name)?;
            missed += 1;
        }
    }
    Ok(missed)
}

/// Apply a drill over the mistake deck, question by question in quiz order.
/// Returns how many questions left the deck.
pub fn record_drill<M: KeyValueStore>(
    trainer: &mut MistakeTrainer<M>,
    quiz: &QuizData,
    graded: &GradedQuiz,
) -> Result<usize, StoreError> {
    let before = trainer.len();
    for (question, result) in graded.pairs(quiz) {
        trainer.record_result(&question.index, result.outcome() == Outcome::Correct)?;
    }
    Ok(before.saturating_sub(trainer.len()))
}
