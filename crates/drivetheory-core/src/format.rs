//! Display helpers for times and scores.

use std::fmt;

/// Format seconds as `m:ss`.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format earned/total as a rounded percentage, `0%` when total is zero.
pub fn format_score(earned: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let pct = (earned as f64 / total as f64) * 100.0;
    format!("{}%", (pct + 0.5).floor() as i64)
}

/// Coarse rating of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Success,
    Warning,
    Danger,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreBand::Success
        } else if percentage >= 60.0 {
            ScoreBand::Warning
        } else {
            ScoreBand::Danger
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Success => write!(f, "success"),
            ScoreBand::Warning => write!(f, "warning"),
            ScoreBand::Danger => write!(f, "danger"),
        }
    }
}
