//! Core data model types for drivetheory.
//!
//! These mirror the JSON shape of the `topic-<id>.json` quiz files, so field
//! names serialize as camelCase.

use serde::{Deserialize, Deserializer, Serialize};

/// A single answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text, if the option is textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image path or URL, if the option is a picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether this option is part of the correct answer.
    #[serde(default)]
    pub checked: bool,
}

/// A multiple-choice, multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier within a topic.
    pub index: String,
    /// The question prompt.
    pub text: String,
    /// Point value as it appears in the source data.
    #[serde(default, deserialize_with = "points_from_string_or_number")]
    pub points: String,
    /// Page number in the official question catalogue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Answer options in canonical order.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// Point value as a non-negative integer. Malformed values count as zero.
    pub fn point_value(&self) -> u64 {
        parse_points(&self.points)
    }

    /// Number of options marked correct.
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.checked).count()
    }

    /// The canonical selection vector (the answer key).
    pub fn answer_key(&self) -> UserSelection {
        UserSelection(self.answers.iter().map(|a| a.checked).collect())
    }
}

/// A loaded quiz for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub total_questions: usize,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizData {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            total_questions: questions.len(),
            questions,
        }
    }
}

/// Catalog entry describing a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicInfo {
    pub id: String,
    pub title: String,
    /// Link to the official source document (may be empty).
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub questions_count: usize,
}

/// A user's toggled answers for one question, positional against
/// [`Question::answers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSelection(pub Vec<bool>);

impl UserSelection {
    /// An all-false selection for a question with `len` answers.
    pub fn empty(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Build a selection from zero-based chosen positions.
    pub fn from_positions(len: usize, positions: &[usize]) -> Self {
        let mut selection = Self::empty(len);
        for &p in positions {
            if let Some(slot) = selection.0.get_mut(p) {
                *slot = true;
            }
        }
        selection
    }

    /// Flip the answer at `position`. Out-of-range positions are ignored.
    pub fn toggle(&mut self, position: usize) {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = !*slot;
        }
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    /// True when nothing is selected.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|s| !s)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Parse a point value the way the quiz data expects: optional leading
/// whitespace and `+`, then leading decimal digits. Anything else is zero.
/// Values too large for `u64` saturate.
pub fn parse_points(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

fn points_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Null(()) => String::new(),
    })
}
