//! Saved analysis model.
//!
//! Outputs live at `<outputs>/<pattern>/<source>_<YYYY-MM-DD_HH-MM-SS>.md`.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Timestamp format embedded in output file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Timestamp format written into the output header.
pub const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One saved analysis file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub path: PathBuf,
    pub filename: String,
    /// Source document stem.
    pub source: String,
    /// Pattern directory name.
    pub pattern: String,
    pub timestamp: NaiveDateTime,
}

/// Saved analyses grouped by pattern, newest first within each pattern.
pub type PatternOutputs = BTreeMap<String, Vec<OutputRecord>>;

/// All saved analyses: source → pattern → records (newest first).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct OutputIndex {
    sources: BTreeMap<String, PatternOutputs>,
}

impl OutputIndex {
    /// Add a record; call [`Self::sort`] after the last insert.
    pub fn insert(&mut self, record: OutputRecord) {
        self.sources
            .entry(record.source.clone())
            .or_default()
            .entry(record.pattern.clone())
            .or_default()
            .push(record);
    }

    /// Order every pattern's records newest first.
    pub fn sort(&mut self) {
        for patterns in self.sources.values_mut() {
            for records in patterns.values_mut() {
                records.sort_by(|a, b| {
                    b.timestamp
                        .cmp(&a.timestamp)
                        .then_with(|| b.filename.cmp(&a.filename))
                });
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source stems that have outputs, alphabetically.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// Outputs for one source.
    #[must_use]
    pub fn for_source(&self, source: &str) -> Option<&PatternOutputs> {
        self.sources.get(source)
    }

    /// Iterate `(source, pattern, records)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[OutputRecord])> {
        self.sources.iter().flat_map(|(source, patterns)| {
            patterns
                .iter()
                .map(move |(pattern, records)| (source.as_str(), pattern.as_str(), records.as_slice()))
        })
    }

    /// Every record.
    pub fn records(&self) -> impl Iterator<Item = &OutputRecord> {
        self.iter().flat_map(|(_, _, records)| records.iter())
    }

    /// Total number of saved analyses.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(source: &str, pattern: &str, day: u32) -> OutputRecord {
        let timestamp = NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let filename = format!("{source}_{}.md", timestamp.format(FILE_TIMESTAMP_FORMAT));
        OutputRecord {
            path: PathBuf::from(format!("outputs/{pattern}/{filename}")),
            filename,
            source: source.to_string(),
            pattern: pattern.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_grouping_and_order() {
        let mut index = OutputIndex::default();
        index.insert(record("alice", "summarize", 1));
        index.insert(record("alice", "summarize", 3));
        index.insert(record("alice", "red_team", 2));
        index.insert(record("bob", "summarize", 2));
        index.sort();

        assert_eq!(index.sources().collect::<Vec<_>>(), vec!["alice", "bob"]);
        assert_eq!(index.total(), 4);

        let alice = index.for_source("alice").unwrap();
        let summaries = &alice["summarize"];
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].timestamp > summaries[1].timestamp);
        assert_eq!(alice.len(), 2);
    }

    #[test]
    fn test_empty() {
        let index = OutputIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.total(), 0);
        assert!(index.for_source("nobody").is_none());
    }
}
