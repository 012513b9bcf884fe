//! Writing assistant command implementation.

use crate::analysis::Analyzer;
use crate::config::Settings;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::patterns::AssistKind;
use crate::storage::{load_document, resolve_document};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct AssistOutput<'a> {
    file: &'a str,
    kind: &'static str,
    response: String,
}

/// Ask the writing assistant for help with a document.
pub fn execute(settings: &Settings, file: &str, kind: &str, json: bool) -> Result<()> {
    let kind = AssistKind::parse(kind)?;
    let document = resolve_document(settings.telos_dir(), file)?;
    let draft = load_document(&document)?;

    let client = GeminiClient::from_settings(settings)?;
    let rt = super::runtime()?;

    if !json {
        eprintln!("Getting {kind} help for {}...", document.file_name);
    }
    let response = rt.block_on(Analyzer::new(&client).assist(kind, &draft));

    if json {
        let output = AssistOutput {
            file: &document.file_name,
            kind: kind.key(),
            response,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", format!("## AI Suggestions: {kind}").bold());
        println!();
        println!("{response}");
    }
    Ok(())
}
