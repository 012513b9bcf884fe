//! Status command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::patterns;
use crate::storage::{find_documents, list_outputs};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput<'a> {
    model: &'a str,
    endpoint: &'a str,
    api_key_configured: bool,
    telos_dir: String,
    telos_dir_exists: bool,
    outputs_dir: String,
    document_count: usize,
    analysis_count: usize,
    pattern_count: usize,
}

/// Execute status command.
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let documents = find_documents(settings.telos_dir())?;
    let index = list_outputs(settings.outputs_dir())?;

    let output = StatusOutput {
        model: &settings.model,
        endpoint: &settings.endpoint,
        api_key_configured: settings.has_api_key(),
        telos_dir: settings.telos_dir().display().to_string(),
        telos_dir_exists: settings.telos_dir().is_dir(),
        outputs_dir: settings.outputs_dir().display().to_string(),
        document_count: documents.len(),
        analysis_count: index.total(),
        pattern_count: patterns::count(),
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{}", "Telos Status".bold());
    println!("============");
    println!();
    println!("Model:    {}", output.model);
    if output.api_key_configured {
        println!("API key:  {}", "configured".green());
    } else {
        println!("API key:  {}", "missing".red());
    }
    println!();
    println!("Documents: {} ({})", output.document_count, output.telos_dir);
    println!("Analyses:  {} ({})", output.analysis_count, output.outputs_dir);
    println!("Patterns:  {}", output.pattern_count);

    if !output.telos_dir_exists {
        println!();
        println!("No Telos folder yet. Create a document with: telos new <name> --template");
    } else if !output.api_key_configured {
        println!();
        println!("Set GEMINI_API_KEY in your environment or .env to run analyses.");
    }

    Ok(())
}
