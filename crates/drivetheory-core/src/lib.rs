//! drivetheory-core: quiz model, scoring, and progress tracking.
//!
//! This crate grades quiz attempts and keeps the two persisted collections
//! the rest of drivetheory builds on: the attempt history and the mistake
//! trainer deck.

pub mod catalog;
pub mod error;
pub mod format;
pub mod history;
pub mod model;
pub mod resource;
pub mod scoring;
pub mod session;
pub mod store;
pub mod traits;
pub mod trainer;
