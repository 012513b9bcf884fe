//! Outputs command implementation.

use crate::cli::OutputsCommands;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::insights::format_relative_time;
use crate::model::{OutputIndex, OutputRecord};
use crate::patterns;
use crate::storage::{delete_all_for_source, delete_output, list_outputs, load_output};
use crate::validate::normalize_key;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct OutputListOutput<'a> {
    count: usize,
    outputs: Vec<&'a OutputRecord>,
}

#[derive(Serialize)]
struct DeleteOutput<'a> {
    source: &'a str,
    deleted: usize,
}

/// Execute outputs subcommands.
pub fn execute(command: &OutputsCommands, settings: &Settings, json: bool) -> Result<()> {
    match command {
        OutputsCommands::List { source } => list(settings, source.as_deref(), json),
        OutputsCommands::Show {
            source,
            pattern,
            version,
        } => show(settings, source, pattern, *version, json),
        OutputsCommands::Delete {
            source,
            pattern,
            version,
        } => delete(settings, source, pattern, *version, json),
        OutputsCommands::Purge { source, yes } => purge(settings, source, *yes, json),
        OutputsCommands::Open => open(settings, json),
    }
}

/// Find one version (1 = newest) of a source/pattern pair.
///
/// The pattern may be given as a display name ("Red Team") or key.
fn select<'a>(
    index: &'a OutputIndex,
    source: &str,
    pattern: &str,
    version: usize,
) -> Result<&'a OutputRecord> {
    let not_found = || Error::OutputNotFound {
        name: format!("{source}/{pattern} (version {version})"),
    };
    index
        .for_source(source)
        .and_then(|patterns| {
            patterns
                .get(pattern)
                .or_else(|| patterns.get(&normalize_key(pattern)))
        })
        .and_then(|records| version.checked_sub(1).and_then(|i| records.get(i)))
        .ok_or_else(not_found)
}

fn list(settings: &Settings, source: Option<&str>, json: bool) -> Result<()> {
    let index = list_outputs(settings.outputs_dir())?;
    let records: Vec<&OutputRecord> = index
        .records()
        .filter(|r| source.is_none_or(|s| r.source == s))
        .collect();

    if crate::is_csv() {
        println!("source,pattern,timestamp,path");
        for r in &records {
            println!(
                "{},{},{},{}",
                crate::csv_escape(&r.source),
                r.pattern,
                r.timestamp,
                crate::csv_escape(&r.path.display().to_string())
            );
        }
        return Ok(());
    }

    if json {
        let output = OutputListOutput {
            count: records.len(),
            outputs: records,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No saved analyses yet.");
        println!();
        println!("Run one with: telos analyze <file> --pattern summarize");
        return Ok(());
    }

    let now = super::now();
    println!("Saved analyses ({} found):", records.len());
    for (src, pattern, versions) in index.iter() {
        if source.is_some_and(|s| s != src) {
            continue;
        }
        let icon = patterns::category_of(pattern).map_or("📄", |c| c.icon);
        println!();
        println!("{} {} {}", icon, src.bold(), patterns::title(pattern).cyan());
        for (i, record) in versions.iter().enumerate() {
            println!(
                "  v{:<3} {:<20} {}",
                i + 1,
                format_relative_time(record.timestamp, now),
                record.filename.dimmed()
            );
        }
    }
    Ok(())
}

fn show(settings: &Settings, source: &str, pattern: &str, version: usize, json: bool) -> Result<()> {
    let index = list_outputs(settings.outputs_dir())?;
    let record = select(&index, source, pattern, version)?;
    let content = load_output(record)?;

    if json {
        let output = serde_json::json!({
            "output": record,
            "content": content,
        });
        println!("{output}");
    } else {
        println!("{content}");
    }
    Ok(())
}

fn delete(settings: &Settings, source: &str, pattern: &str, version: usize, json: bool) -> Result<()> {
    let index = list_outputs(settings.outputs_dir())?;
    let record = select(&index, source, pattern, version)?;

    if crate::is_dry_run() {
        if json {
            let output = serde_json::json!({
                "dry_run": true,
                "action": "delete_output",
                "path": record.path.display().to_string(),
            });
            println!("{output}");
        } else {
            println!("Would delete {}", record.path.display());
        }
        return Ok(());
    }

    delete_output(record)?;

    if json {
        let output = DeleteOutput { source, deleted: 1 };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} {}", "Deleted".red(), record.path.display());
    }
    Ok(())
}

fn purge(settings: &Settings, source: &str, yes: bool, json: bool) -> Result<()> {
    let index = list_outputs(settings.outputs_dir())?;
    let count = index
        .for_source(source)
        .map(|patterns| patterns.values().map(Vec::len).sum::<usize>())
        .ok_or_else(|| Error::OutputNotFound {
            name: source.to_string(),
        })?;

    if crate::is_dry_run() {
        if json {
            let output = serde_json::json!({
                "dry_run": true,
                "action": "purge_outputs",
                "source": source,
                "count": count,
            });
            println!("{output}");
        } else {
            println!("Would delete {count} analyses of {source}");
        }
        return Ok(());
    }

    if !yes {
        return Err(Error::ConfirmationRequired(format!(
            "this deletes all {count} analyses of {source}"
        )));
    }

    let deleted = delete_all_for_source(&index, source)?;

    if json {
        let output = DeleteOutput { source, deleted };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} {deleted} analyses of {source}", "Deleted".red());
    }
    Ok(())
}

fn open(settings: &Settings, json: bool) -> Result<()> {
    let dir = settings.outputs_dir();
    if !dir.is_dir() {
        return Err(Error::OutputNotFound {
            name: dir.display().to_string(),
        });
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    if crate::is_dry_run() {
        println!("Would run: {opener} {}", dir.display());
        return Ok(());
    }

    std::process::Command::new(opener).arg(dir).spawn()?;
    tracing::debug!(opener, dir = %dir.display(), "Opened outputs folder");

    if json {
        println!("{}", serde_json::json!({ "opened": dir.display().to_string() }));
    } else {
        println!("Opened {}", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::storage::save_output;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_select_versions() {
        let temp_dir = TempDir::new().unwrap();
        let doc = Document::from_path(Path::new("telos/me.md")).unwrap();
        for day in 1..=3 {
            let ts = NaiveDate::from_ymd_opt(2025, 2, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap();
            save_output(temp_dir.path(), "summarize", &doc, "x", ts).unwrap();
        }
        let index = list_outputs(temp_dir.path()).unwrap();

        let newest = select(&index, "me", "summarize", 1).unwrap();
        assert!(newest.filename.contains("2025-02-03"));
        let oldest = select(&index, "me", "summarize", 3).unwrap();
        assert!(oldest.filename.contains("2025-02-01"));

        assert!(select(&index, "me", "summarize", 0).is_err());
        assert!(select(&index, "me", "summarize", 4).is_err());
        assert!(select(&index, "me", "red_team", 1).is_err());
        assert!(select(&index, "you", "summarize", 1).is_err());
    }

    #[test]
    fn test_select_accepts_display_names() {
        let temp_dir = TempDir::new().unwrap();
        let doc = Document::from_path(Path::new("telos/me.md")).unwrap();
        let ts = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        save_output(temp_dir.path(), "red_team", &doc, "x", ts).unwrap();
        save_output(temp_dir.path(), "summarize", &doc, "y", ts).unwrap();
        let index = list_outputs(temp_dir.path()).unwrap();

        for name in ["red_team", "Red Team", "red-team", "  RED_TEAM "] {
            let record = select(&index, "me", name, 1).unwrap();
            assert_eq!(record.pattern, "red_team", "{name}");
        }
        assert_eq!(select(&index, "me", "Summarize", 1).unwrap().pattern, "summarize");
        assert!(select(&index, "me", "Red Teams", 1).is_err());
    }
}
