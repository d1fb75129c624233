//! Quiz grading.
//!
//! Grading is all-or-nothing per question: the selection must match the
//! answer key exactly. Unanswered questions are counted separately and never
//! earn points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuizData, UserSelection};

/// Outcome of a single graded question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Per-question grading result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// The question's `index`.
    pub question_id: String,
    pub user_answers: Vec<bool>,
    pub is_correct: bool,
    pub is_unanswered: bool,
    /// Raw point value, as in the question data.
    pub points: String,
}

impl QuizResult {
    /// Collapse the two flags into the outcome used for counting.
    pub fn outcome(&self) -> Outcome {
        if self.is_unanswered {
            Outcome::Unanswered
        } else if self.is_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Aggregate counts for a graded attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub total_questions: u32,
    pub correct_questions: u32,
    pub incorrect_questions: u32,
    pub unanswered_questions: u32,
    pub total_points: u64,
    pub earned_points: u64,
    /// Elapsed time in whole seconds.
    pub time_taken: u64,
}

impl QuizSummary {
    /// Earned over total points in `[0, 1]`; zero when nothing was at stake.
    pub fn ratio(&self) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            self.earned_points as f64 / self.total_points as f64
        }
    }

    /// [`ratio`](Self::ratio) as a percentage.
    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }
}

/// Results and summary produced by [`score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedQuiz {
    pub results: Vec<QuizResult>,
    pub summary: QuizSummary,
}

impl GradedQuiz {
    /// Questions paired with their results, in quiz order.
    pub fn pairs<'a>(
        &'a self,
        quiz: &'a QuizData,
    ) -> impl Iterator<Item = (&'a Question, &'a QuizResult)> {
        quiz.questions.iter().zip(self.results.iter())
    }
}

/// Grade one question against a selection.
pub fn grade_question(question: &Question, selection: &UserSelection) -> QuizResult {
    let is_unanswered = selection.is_blank();
    let is_correct = question
        .answers
        .iter()
        .enumerate()
        .all(|(j, answer)| selection.is_selected(j) == answer.checked);

    QuizResult {
        question_id: question.index.clone(),
        user_answers: selection.as_slice().to_vec(),
        is_correct,
        is_unanswered,
        points: question.points.clone(),
    }
}

/// Whole seconds between two instants, clamped at zero. Missing either end
/// yields zero.
pub fn elapsed_secs(started_at: Option<DateTime<Utc>>, finished_at: Option<DateTime<Utc>>) -> u64 {
    match (started_at, finished_at) {
        (Some(start), Some(end)) => {
            let millis = (end - start).num_milliseconds();
            if millis <= 0 {
                0
            } else {
                (millis / 1000) as u64
            }
        }
        _ => 0,
    }
}

/// Grade a whole attempt.
///
/// `selections[i]` belongs to `quiz.questions[i]`; a missing entry counts as
/// an all-false selection.
pub fn score(
    quiz: &QuizData,
    selections: &[UserSelection],
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
) -> GradedQuiz {
    let blank = UserSelection::default();
    let mut summary = QuizSummary {
        total_questions: quiz.questions.len() as u32,
        time_taken: elapsed_secs(started_at, finished_at),
        ..Default::default()
    };

    let results = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selection = selections.get(i).unwrap_or(&blank);
            let result = grade_question(question, selection);
            let points = question.point_value();

            summary.total_points = summary.total_points.saturating_add(points);
            match result.outcome() {
                Outcome::Correct => {
                    summary.correct_questions += 1;
                    summary.earned_points = summary.earned_points.saturating_add(points);
                }
                Outcome::Incorrect => summary.incorrect_questions += 1,
                Outcome::Unanswered => summary.unanswered_questions += 1,
            }
            result
        })
        .collect();

    GradedQuiz { results, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Answer;
    use chrono::Duration;

    fn question(index: &str, points: &str, key: &[bool]) -> Question {
        Question {
            index: index.into(),
            text: format!("Question {index}"),
            points: points.into(),
            page_num: None,
            image: None,
            video: None,
            answers: key
                .iter()
                .map(|&checked| Answer {
                    text: Some("option".into()),
                    image: None,
                    checked,
                })
                .collect(),
        }
    }

    fn sel(bits: &[bool]) -> UserSelection {
        UserSelection(bits.to_vec())
    }

    #[test]
    fn two_question_scenario() {
        let quiz = QuizData::new(vec![
            question("1", "5", &[true, false]),
            question("2", "5", &[false, true]),
        ]);
        let graded = score(
            &quiz,
            &[sel(&[true, false]), sel(&[false, false])],
            None,
            None,
        );

        let s = graded.summary;
        assert_eq!(s.total_questions, 2);
        assert_eq!(s.correct_questions, 1);
        assert_eq!(s.unanswered_questions, 1);
        assert_eq!(s.incorrect_questions, 0);
        assert_eq!(s.earned_points, 5);
        assert_eq!(s.total_points, 10);
        assert_eq!(s.time_taken, 0);
        assert!(graded.results[0].is_correct);
        assert!(graded.results[1].is_unanswered);
    }

    #[test]
    fn single_wrong_toggle_fails_question() {
        let q = question("1", "3", &[true, true, false]);
        assert!(grade_question(&q, &sel(&[true, true, false])).is_correct);
        assert!(!grade_question(&q, &sel(&[true, false, false])).is_correct);
        assert!(!grade_question(&q, &sel(&[true, true, true])).is_correct);
    }

    #[test]
    fn unanswered_regardless_of_key() {
        let q = question("1", "3", &[false, false]);
        let result = grade_question(&q, &sel(&[false, false]));
        assert!(result.is_unanswered);
        assert_eq!(result.outcome(), Outcome::Unanswered);

        let quiz = QuizData::new(vec![q]);
        let graded = score(&quiz, &[sel(&[false, false])], None, None);
        assert_eq!(graded.summary.unanswered_questions, 1);
        assert_eq!(graded.summary.correct_questions, 0);
        assert_eq!(graded.summary.earned_points, 0);
    }

    #[test]
    fn missing_selections_are_blank() {
        let quiz = QuizData::new(vec![
            question("1", "1", &[true]),
            question("2", "1", &[true, false]),
        ]);
        let graded = score(&quiz, &[sel(&[true])], None, None);
        assert_eq!(graded.summary.correct_questions, 1);
        assert_eq!(graded.summary.unanswered_questions, 1);
    }

    #[test]
    fn short_selection_pads_with_false() {
        let q = question("1", "1", &[true, false, false]);
        assert!(grade_question(&q, &sel(&[true])).is_correct);
    }

    #[test]
    fn malformed_points_count_as_zero() {
        let quiz = QuizData::new(vec![
            question("1", "abc", &[true]),
            question("2", "", &[true]),
            question("3", "2", &[true]),
        ]);
        let graded = score(&quiz, &[sel(&[true]), sel(&[true]), sel(&[true])], None, None);
        assert_eq!(graded.summary.total_points, 2);
        assert_eq!(graded.summary.earned_points, 2);
        assert_eq!(graded.summary.correct_questions, 3);
    }

    #[test]
    fn counts_partition_and_points_bounded() {
        let quiz = QuizData::new(vec![
            question("1", "1", &[true, false]),
            question("2", "2", &[false, true]),
            question("3", "3", &[true, true]),
            question("4", "4", &[true, false, true]),
        ]);
        let selections = [
            sel(&[true, false]),
            sel(&[true, false]),
            sel(&[false, false]),
            sel(&[true, false, true]),
        ];
        let graded = score(&quiz, &selections, None, None);
        let s = graded.summary;
        assert_eq!(
            s.correct_questions + s.incorrect_questions + s.unanswered_questions,
            s.total_questions
        );
        assert!(s.earned_points <= s.total_points);

        let expected: u64 = graded
            .pairs(&quiz)
            .filter(|(_, r)| r.outcome() == Outcome::Correct)
            .map(|(q, _)| q.point_value())
            .sum();
        assert_eq!(s.earned_points, expected);
        assert_eq!(s.earned_points, 5);
        assert_eq!(s.incorrect_questions, 1);
    }

    #[test]
    fn large_point_values_add_up_without_overflow() {
        let quiz = QuizData::new(vec![
            question("1", "4294967295", &[true, false]),
            question("2", "1", &[true, false]),
            question("3", "5000000000", &[false, true]),
        ]);
        let selections = [
            sel(&[true, false]),
            sel(&[true, false]),
            sel(&[true, false]),
        ];
        let s = score(&quiz, &selections, None, None).summary;
        assert_eq!(s.earned_points, 4_294_967_296);
        assert_eq!(s.total_points, 9_294_967_296);
        assert!(s.earned_points <= s.total_points);

        let quiz = QuizData::new(vec![
            question("1", "18446744073709551615", &[true]),
            question("2", "7", &[true]),
        ]);
        let s = score(&quiz, &[sel(&[true]), sel(&[true])], None, None).summary;
        assert_eq!(s.total_points, u64::MAX);
        assert_eq!(s.earned_points, u64::MAX);
    }

    #[test]
    fn time_taken_floors_and_clamps() {
        let start = Utc::now();
        assert_eq!(
            elapsed_secs(Some(start), Some(start + Duration::milliseconds(61_999))),
            61
        );
        assert_eq!(
            elapsed_secs(Some(start), Some(start - Duration::seconds(5))),
            0
        );
        assert_eq!(elapsed_secs(None, Some(start)), 0);
        assert_eq!(elapsed_secs(Some(start), None), 0);
    }

    #[test]
    fn scoring_is_repeatable() {
        let quiz = QuizData::new(vec![question("1", "5", &[true, false])]);
        let selections = [sel(&[true, false])];
        let first = score(&quiz, &selections, None, None);
        let second = score(&quiz, &selections, None, None);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_ratio_handles_zero_total() {
        let summary = QuizSummary::default();
        assert_eq!(summary.ratio(), 0.0);

        let summary = QuizSummary {
            total_points: 8,
            earned_points: 6,
            ..Default::default()
        };
        assert!((summary.percentage() - 75.0).abs() < f64::EPSILON);
    }
}
