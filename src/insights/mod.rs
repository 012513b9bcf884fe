//! Insights derived from documents and saved analyses.
//!
//! - [`goals`] - Goal extraction and per-document progress
//! - [`analytics`] - Pattern usage, timeline, and recent activity
//! - [`time`] - Relative time labels
//! - [`search`] - Model-delegated search across documents

pub mod analytics;
pub mod goals;
pub mod search;
pub mod time;

pub use analytics::{analytics, Activity, Analytics, PatternUsage};
pub use goals::{extract_goals, goal_progress, GoalProgress};
pub use search::{semantic_search, SearchHit};
pub use time::format_relative_time;

use regex::Regex;

use crate::error::{Error, Result};

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Other(format!("Regex error: {e}")))
}
