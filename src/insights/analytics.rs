//! Usage analytics over saved analyses.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::model::OutputIndex;

/// How many patterns the usage table keeps.
pub const TOP_PATTERNS: usize = 10;

/// How many entries the recent-activity list keeps.
pub const RECENT_LIMIT: usize = 10;

/// Newest records considered per source and pattern.
const RECENT_PER_PATTERN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternUsage {
    pub pattern: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub source: String,
    pub pattern: String,
    pub timestamp: NaiveDateTime,
}

/// Aggregate counts across every document and saved analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub total_files: usize,
    pub total_analyses: usize,
    /// Most used patterns, highest count first.
    pub pattern_usage: Vec<PatternUsage>,
    /// Analyses per day, oldest day first.
    pub timeline: BTreeMap<NaiveDate, usize>,
    /// Newest analyses first.
    pub recent_activity: Vec<Activity>,
}

impl Analytics {
    /// Average analyses per document, zero when there are no documents.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_per_file(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            self.total_analyses as f64 / self.total_files as f64
        }
    }
}

/// Build analytics from the document count and the output index.
#[must_use]
pub fn analytics(total_files: usize, index: &OutputIndex) -> Analytics {
    let mut usage: HashMap<&str, usize> = HashMap::new();
    let mut timeline: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut recent = Vec::new();

    for (source, pattern, records) in index.iter() {
        *usage.entry(pattern).or_default() += records.len();

        for record in records {
            *timeline.entry(record.timestamp.date()).or_default() += 1;
        }

        recent.extend(records.iter().take(RECENT_PER_PATTERN).map(|r| Activity {
            source: source.to_string(),
            pattern: pattern.to_string(),
            timestamp: r.timestamp,
        }));
    }

    let mut pattern_usage: Vec<PatternUsage> = usage
        .into_iter()
        .map(|(pattern, count)| PatternUsage {
            pattern: pattern.to_string(),
            count,
        })
        .collect();
    pattern_usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
    pattern_usage.truncate(TOP_PATTERNS);

    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(RECENT_LIMIT);

    Analytics {
        total_files,
        total_analyses: index.total(),
        pattern_usage,
        timeline,
        recent_activity: recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutputRecord;
    use std::path::PathBuf;

    fn record(source: &str, pattern: &str, day: u32, hour: u32) -> OutputRecord {
        OutputRecord {
            path: PathBuf::from("unused"),
            filename: format!("{source}-{pattern}-{day}-{hour}.md"),
            source: source.to_string(),
            pattern: pattern.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2025, 5, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_analytics_counts() {
        let mut index = OutputIndex::default();
        for hour in 0..5 {
            index.insert(record("me", "summarize", 1, hour));
        }
        index.insert(record("me", "red_team", 2, 9));
        index.insert(record("you", "red_team", 2, 10));
        index.sort();

        let stats = analytics(2, &index);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_analyses, 7);
        assert_eq!(
            stats.pattern_usage,
            vec![
                PatternUsage { pattern: "summarize".into(), count: 5 },
                PatternUsage { pattern: "red_team".into(), count: 2 },
            ]
        );

        let day = |d| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();
        assert_eq!(stats.timeline.get(&day(1)), Some(&5));
        assert_eq!(stats.timeline.get(&day(2)), Some(&2));

        // Three newest summaries plus two red team runs.
        assert_eq!(stats.recent_activity.len(), 5);
        assert_eq!(stats.recent_activity[0].source, "you");
        assert_eq!(stats.recent_activity[4].timestamp, record("me", "summarize", 1, 2).timestamp);
        assert!((stats.average_per_file() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analytics_empty() {
        let stats = analytics(0, &OutputIndex::default());
        assert_eq!(stats.total_analyses, 0);
        assert!(stats.pattern_usage.is_empty());
        assert!(stats.timeline.is_empty());
        assert!(stats.recent_activity.is_empty());
        assert!(stats.average_per_file().abs() < f64::EPSILON);
    }

    #[test]
    fn test_recent_activity_is_capped() {
        let mut index = OutputIndex::default();
        for (i, pattern) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            for hour in 0..3 {
                index.insert(record("me", pattern, u32::try_from(i).unwrap() + 1, hour));
            }
        }
        index.sort();

        let stats = analytics(1, &index);
        assert_eq!(stats.recent_activity.len(), RECENT_LIMIT);
        assert_eq!(stats.recent_activity[0].pattern, "e");
    }
}
