//! New document command implementation.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::storage::{create_document, template};
use crate::validate::document_file_name;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct NewOutput<'a> {
    file: &'a str,
    path: String,
    bytes: usize,
}

/// Execute new command.
///
/// Content comes from `--content`, a file given with `--from`, or the
/// template. With none of them the template is used.
pub fn execute(
    settings: &Settings,
    name: &str,
    content: Option<&str>,
    from: Option<&Path>,
    json: bool,
) -> Result<()> {
    let content = match (content, from) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InvalidArgument(format!("cannot read {}: file not found", path.display()))
            } else {
                Error::Io(e)
            }
        })?,
        (None, None) => template(chrono::Local::now().date_naive()),
    };

    if crate::is_dry_run() {
        let file = document_file_name(name)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid document name '{name}'")))?;
        let path = settings.telos_dir().join(&file);
        if json {
            let output = serde_json::json!({
                "dry_run": true,
                "action": "create_document",
                "path": path.display().to_string(),
                "bytes": content.len(),
            });
            println!("{output}");
        } else {
            println!("Would create {} ({} bytes)", path.display(), content.len());
        }
        return Ok(());
    }

    let document = create_document(settings.telos_dir(), name, &content)?;

    if json {
        let output = NewOutput {
            file: &document.file_name,
            path: document.path.display().to_string(),
            bytes: content.len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} {}", "Created".green(), document.path.display());
        println!();
        println!("Analyze it with: telos analyze {} --pattern summarize", document.stem);
    }

    Ok(())
}
