//! Analyze command implementation.

use crate::analysis::{Analyzer, SectionProgress};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::gemini::{GeminiClient, TextGenerator};
use crate::model::Document;
use crate::patterns::{self, Pattern};
use crate::storage::{load_document, resolve_document, save_output};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct AnalysisOutput {
    pattern: &'static str,
    title: String,
    response: String,
    saved_to: Option<PathBuf>,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    document: &'a str,
    model: &'a str,
    sectioned: bool,
    analyses: Vec<AnalysisOutput>,
}

/// Execute analyze command.
///
/// Runs one pattern, or every pattern in display order, against a
/// document. Each response is printed and saved as it arrives.
pub fn execute(
    settings: &Settings,
    file: &str,
    pattern: Option<&str>,
    all: bool,
    no_save: bool,
    json: bool,
) -> Result<()> {
    let document = resolve_document(settings.telos_dir(), file)?;
    let content = load_document(&document)?;
    if content.trim().is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{} is empty; add some content first",
            document.file_name
        )));
    }

    let selected: Vec<&'static Pattern> = match pattern {
        Some(name) if !all => vec![patterns::find(name)?],
        _ => patterns::all().collect(),
    };

    if crate::is_dry_run() {
        let names: Vec<&str> = selected.iter().map(|p| p.name).collect();
        if json {
            let output = serde_json::json!({
                "dry_run": true,
                "action": "analyze",
                "document": document.file_name,
                "patterns": names,
            });
            println!("{output}");
        } else {
            println!("Would analyze {} with: {}", document.file_name, names.join(", "));
        }
        return Ok(());
    }

    let client = GeminiClient::from_settings(settings)?;
    let rt = super::runtime()?;
    rt.block_on(run(settings, &client, &document, &content, &selected, !no_save, json))
}

async fn run<G: TextGenerator>(
    settings: &Settings,
    generator: &G,
    document: &Document,
    content: &str,
    selected: &[&'static Pattern],
    save: bool,
    json: bool,
) -> Result<()> {
    let analyzer = Analyzer::new(generator);
    let sectioned = analyzer.needs_sections(content);
    let total = selected.len();

    if sectioned && !json {
        eprintln!(
            "{}",
            "Large document detected. Processing in sections...".yellow()
        );
    }

    let mut analyses = Vec::with_capacity(total);
    for (i, pattern) in selected.iter().enumerate() {
        if !json {
            if total > 1 {
                eprintln!("({}/{total}) Running {}...", i + 1, pattern.title());
            } else {
                eprintln!("Running {} on {}...", pattern.title(), document.file_name);
            }
        }
        tracing::info!(pattern = pattern.name, document = %document.file_name, "Running analysis");

        let response = analyzer
            .run_with_progress(pattern.prompt, content, |p: SectionProgress<'_>| {
                if !json {
                    eprintln!("  Section {}/{}: {}", p.index, p.total, p.title);
                }
            })
            .await;

        let saved_to = if save {
            Some(save_output(
                settings.outputs_dir(),
                pattern.name,
                document,
                &response,
                super::now(),
            )?)
        } else {
            None
        };

        if !json {
            println!("{}", format!("## {}", pattern.title()).bold());
            println!();
            println!("{response}");
            println!();
            if let Some(ref path) = saved_to {
                println!("{} {}", "Saved to".green(), path.display());
                println!();
            }
        }

        analyses.push(AnalysisOutput {
            pattern: pattern.name,
            title: pattern.title(),
            response,
            saved_to,
        });
    }

    if json {
        let output = AnalyzeOutput {
            document: &document.file_name,
            model: generator.model(),
            sectioned,
            analyses,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if total > 1 {
        println!("{}", format!("Completed {total} analyses.").green());
    }

    Ok(())
}
