//! drivetheory-report: presenting attempts and reference material.

pub mod html;
pub mod resource;

pub use html::{generate_html, write_html_report, AttemptReview};
pub use resource::{render_text, strip_html};
