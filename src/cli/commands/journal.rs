//! Journal command implementation.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::storage::{append_journal_entry, resolve_document, JOURNAL_DATE_FORMAT};
use colored::Colorize;

/// Append a dated entry to a document.
pub fn execute(settings: &Settings, file: &str, text: &str, json: bool) -> Result<()> {
    let document = resolve_document(settings.telos_dir(), file)?;
    let today = chrono::Local::now().date_naive();
    let date = today.format(JOURNAL_DATE_FORMAT).to_string();

    if text.trim().is_empty() {
        return Err(Error::InvalidArgument("journal entry is empty".to_string()));
    }

    if crate::is_dry_run() {
        if json {
            let output = serde_json::json!({
                "dry_run": true,
                "action": "journal",
                "file": document.file_name,
                "entry": format!("- {date}: {}", text.trim()),
            });
            println!("{output}");
        } else {
            println!("Would append to {}: - {date}: {}", document.file_name, text.trim());
        }
        return Ok(());
    }

    append_journal_entry(&document, text, today)?;

    if json {
        let output = serde_json::json!({
            "file": document.file_name,
            "date": date,
            "entry": text.trim(),
        });
        println!("{output}");
    } else {
        println!("{} entry for {date} to {}", "Added".green(), document.file_name);
    }
    Ok(())
}
