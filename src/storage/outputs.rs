//! Saved analyses on disk.
//!
//! Each analysis is one markdown file under `<outputs>/<pattern>/`, named
//! `<source>_<YYYY-MM-DD_HH-MM-SS>.md`, with a small metadata header.
//! The directory tree is the only index.

use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{
    Document, OutputIndex, OutputRecord, FILE_TIMESTAMP_FORMAT, HEADER_TIMESTAMP_FORMAT,
};
use crate::patterns::title;

/// Length of a `YYYY-MM-DD_HH-MM-SS` suffix.
const TIMESTAMP_LEN: usize = 19;

/// Build the full file content for a saved analysis.
#[must_use]
pub fn render_output_file(pattern: &str, source_file_name: &str, response: &str, now: NaiveDateTime) -> String {
    format!(
        "# {} Analysis\n\n\
         **Source File:** {source_file_name}\n\
         **Date:** {}\n\
         **Pattern:** {pattern}\n\n\
         ---\n\n\
         {response}",
        title(pattern),
        now.format(HEADER_TIMESTAMP_FORMAT),
    )
}

/// Save a response under `<outputs>/<pattern>/<stem>_<timestamp>.md`.
///
/// Returns the written path. A save within the same second as an earlier
/// one for the same source and pattern replaces it.
pub fn save_output(
    outputs_dir: &Path,
    pattern: &str,
    source: &Document,
    response: &str,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let pattern_dir = outputs_dir.join(pattern);
    fs::create_dir_all(&pattern_dir)?;

    let filename = format!("{}_{}.md", source.stem, now.format(FILE_TIMESTAMP_FORMAT));
    let path = pattern_dir.join(filename);

    fs::write(&path, render_output_file(pattern, &source.file_name, response, now))?;

    tracing::info!(path = %path.display(), pattern, "Saved analysis");
    Ok(path)
}

/// Split `<source>_<timestamp>.md` into source stem and timestamp.
///
/// Returns `None` when the name does not carry a valid timestamp suffix.
#[must_use]
pub fn parse_output_filename(filename: &str) -> Option<(String, NaiveDateTime)> {
    let stem = filename.strip_suffix(".md")?;
    if stem.len() < TIMESTAMP_LEN + 2 || !stem.is_char_boundary(stem.len() - TIMESTAMP_LEN - 1) {
        return None;
    }

    let (source, suffix) = stem.split_at(stem.len() - TIMESTAMP_LEN - 1);
    let timestamp = suffix.strip_prefix('_')?;
    let parsed = NaiveDateTime::parse_from_str(timestamp, FILE_TIMESTAMP_FORMAT).ok()?;
    Some((source.to_string(), parsed))
}

fn modified_time(path: &Path) -> NaiveDateTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Local>::from(t).naive_local())
        .unwrap_or_default()
}

/// Index every saved analysis under `outputs_dir`.
///
/// A missing folder yields an empty index. Files whose names do not carry
/// a timestamp are keyed by their whole stem and dated by modification time.
pub fn list_outputs(outputs_dir: &Path) -> Result<OutputIndex> {
    let mut index = OutputIndex::default();
    if !outputs_dir.is_dir() {
        return Ok(index);
    }

    for pattern_entry in fs::read_dir(outputs_dir)?.filter_map(std::result::Result::ok) {
        let pattern_path = pattern_entry.path();
        if !pattern_path.is_dir() {
            continue;
        }
        let pattern = pattern_entry.file_name().to_string_lossy().into_owned();

        for entry in fs::read_dir(&pattern_path)?.filter_map(std::result::Result::ok) {
            let path = entry.path();
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !path.is_file() || !filename.ends_with(".md") {
                continue;
            }

            let (source, timestamp) = parse_output_filename(&filename).unwrap_or_else(|| {
                let stem = filename.trim_end_matches(".md").to_string();
                (stem, modified_time(&path))
            });

            index.insert(OutputRecord {
                path,
                filename,
                source,
                pattern: pattern.clone(),
                timestamp,
            });
        }
    }

    index.sort();
    tracing::debug!(total = index.total(), "Indexed outputs");
    Ok(index)
}

/// Read a saved analysis.
pub fn load_output(record: &OutputRecord) -> Result<String> {
    fs::read_to_string(&record.path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::OutputNotFound {
                name: record.filename.clone(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Remove one saved analysis.
pub fn delete_output(record: &OutputRecord) -> Result<()> {
    fs::remove_file(&record.path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::OutputNotFound {
                name: record.filename.clone(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    tracing::info!(path = %record.path.display(), "Deleted analysis");
    Ok(())
}

/// Remove every saved analysis for a source. Returns the number removed.
///
/// Stops at the first failure; files removed before it stay removed.
pub fn delete_all_for_source(index: &OutputIndex, source: &str) -> Result<usize> {
    let patterns = index.for_source(source).ok_or_else(|| Error::OutputNotFound {
        name: source.to_string(),
    })?;

    let mut deleted = 0;
    for record in patterns.values().flatten() {
        delete_output(record)?;
        deleted += 1;
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 30, 5)
            .unwrap()
    }

    fn doc(name: &str) -> Document {
        Document::from_path(Path::new(&format!("telos/{name}"))).unwrap()
    }

    #[test]
    fn test_save_output_layout_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = save_output(temp_dir.path(), "red_team", &doc("my-telos.md"), "Body text", at(2, 14))
            .unwrap();

        assert_eq!(
            path,
            temp_dir.path().join("red_team").join("my-telos_2025-06-02_14-30-05.md")
        );
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Red Team Analysis\n\n\
             **Source File:** my-telos.md\n\
             **Date:** 2025-06-02 14:30:05\n\
             **Pattern:** red_team\n\n\
             ---\n\n\
             Body text"
        );
    }

    #[test]
    fn test_parse_output_filename() {
        assert_eq!(
            parse_output_filename("my_telos_2025-06-02_14-30-05.md"),
            Some(("my_telos".to_string(), at(2, 14)))
        );
        assert_eq!(parse_output_filename("plain.md"), None);
        assert_eq!(parse_output_filename("x_2025-13-02_14-30-05.md"), None);
        assert_eq!(parse_output_filename("x_2025-06-02_14-30-05.txt"), None);
        assert_eq!(parse_output_filename("_2025-06-02_14-30-05.md"), None);
    }

    #[test]
    fn test_list_outputs_groups_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        save_output(out, "summarize", &doc("me.md"), "old", at(1, 9)).unwrap();
        save_output(out, "summarize", &doc("me.md"), "new", at(3, 9)).unwrap();
        save_output(out, "therapist", &doc("me.md"), "t", at(2, 9)).unwrap();
        save_output(out, "summarize", &doc("other.md"), "o", at(2, 9)).unwrap();
        fs::write(out.join("stray.md"), "ignored").unwrap();
        fs::write(out.join("summarize").join("notes.txt"), "ignored").unwrap();
        fs::write(out.join("summarize").join("handmade.md"), "kept").unwrap();

        let index = list_outputs(out).unwrap();
        assert_eq!(index.total(), 5);

        let me = index.for_source("me").unwrap();
        assert_eq!(me["summarize"].len(), 2);
        assert_eq!(me["summarize"][0].timestamp, at(3, 9));
        assert_eq!(me["therapist"][0].pattern, "therapist");

        // No timestamp in the name: whole stem is the source.
        assert!(index.for_source("handmade").is_some());
    }

    #[test]
    fn test_list_outputs_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let index = list_outputs(&temp_dir.path().join("none")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_delete_output_and_all_for_source() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        save_output(out, "summarize", &doc("me.md"), "a", at(1, 9)).unwrap();
        save_output(out, "red_team", &doc("me.md"), "b", at(1, 10)).unwrap();
        let keep = save_output(out, "red_team", &doc("you.md"), "c", at(1, 11)).unwrap();

        let index = list_outputs(out).unwrap();
        let first = index.for_source("me").unwrap()["summarize"][0].clone();
        assert_eq!(load_output(&first).unwrap().lines().next(), Some("# Summarize Analysis"));
        delete_output(&first).unwrap();
        assert!(matches!(delete_output(&first), Err(Error::OutputNotFound { .. })));

        let index = list_outputs(out).unwrap();
        assert_eq!(delete_all_for_source(&index, "me").unwrap(), 1);
        assert!(keep.exists());
        assert!(list_outputs(out).unwrap().for_source("me").is_none());
        assert!(matches!(
            delete_all_for_source(&index, "ghost"),
            Err(Error::OutputNotFound { .. })
        ));
    }
}
