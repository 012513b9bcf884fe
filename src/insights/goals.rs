//! Goal extraction and per-document progress.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::compile;
use crate::error::Result;
use crate::model::{Document, OutputIndex};

/// How many goals a progress report carries.
pub const MAX_REPORTED_GOALS: usize = 10;

/// Goals found in a document and how often it has been analysed.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub document: String,
    pub goals_count: usize,
    /// First [`MAX_REPORTED_GOALS`] goals in document order.
    pub goals: Vec<String>,
    pub total_analyses: usize,
    pub last_analysis: Option<NaiveDateTime>,
    pub patterns_used: Vec<String>,
}

/// Heading depth of a markdown heading line, if it is one.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    (level > 0 && line[level..].starts_with(char::is_whitespace)).then_some(level)
}

/// Lines of the `## Goals` section, up to the next level-1 or level-2 heading.
fn goals_section(content: &str) -> Result<Vec<&str>> {
    let start = compile(r"(?i)^##\s*goals\s*$")?;

    let mut lines = content.lines();
    if lines.by_ref().find(|l| start.is_match(l.trim_end())).is_none() {
        return Ok(Vec::new());
    }

    Ok(lines
        .take_while(|l| heading_level(l).is_none_or(|level| level > 2))
        .collect())
}

/// Extract goals from a Telos document.
///
/// Bullet items in the Goals section come first, then numbered items from
/// anywhere in the document. Duplicates keep their first position. Empty
/// items and unfilled template slots such as `G1:` are dropped.
pub fn extract_goals(content: &str) -> Result<Vec<String>> {
    let bullet = compile(r"^\s*[-*]\s+(.+)$")?;
    let numbered = compile(r"(?m)^\s*\d+\.\s+(.+)$")?;
    let placeholder = compile(r"^[A-Za-z]\d*:$")?;

    let bullets = goals_section(content)?
        .into_iter()
        .filter_map(|line| bullet.captures(line).map(|c| c[1].to_string()));
    let numbers = numbered
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect::<Vec<_>>();

    let mut goals: Vec<String> = Vec::new();
    for goal in bullets.chain(numbers) {
        let goal = goal.trim();
        if goal.is_empty() || placeholder.is_match(goal) {
            continue;
        }
        if !goals.iter().any(|g| g == goal) {
            goals.push(goal.to_string());
        }
    }
    Ok(goals)
}

/// Summarise goals and analysis history for one document.
pub fn goal_progress(document: &Document, content: &str, index: &OutputIndex) -> Result<GoalProgress> {
    let goals = extract_goals(content)?;
    let outputs = index.for_source(&document.stem);

    let (total_analyses, last_analysis, patterns_used) = match outputs {
        Some(patterns) => (
            patterns.values().map(Vec::len).sum(),
            patterns
                .values()
                .filter_map(|records| records.first())
                .map(|r| r.timestamp)
                .max(),
            patterns.keys().cloned().collect(),
        ),
        None => (0, None, Vec::new()),
    };

    Ok(GoalProgress {
        document: document.file_name.clone(),
        goals_count: goals.len(),
        goals: goals.into_iter().take(MAX_REPORTED_GOALS).collect(),
        total_analyses,
        last_analysis,
        patterns_used,
    })
}
