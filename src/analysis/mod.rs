//! Document analysis.
//!
//! Small documents go to the model in one request. Documents whose
//! estimated size exceeds [`MAX_INPUT_TOKENS`] are split at `## ` headings,
//! each section is analyzed separately, and the per-section replies are
//! joined under one heading.

pub mod runner;
pub mod sections;

pub use runner::{Analyzer, SectionProgress, MAX_INPUT_TOKENS};
pub use sections::{estimate_tokens, split_by_sections, Section};
