//! Goals command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::insights::{format_relative_time, goal_progress};
use crate::patterns;
use crate::storage::{list_outputs, load_document, resolve_document};
use colored::Colorize;

/// Show goals and analysis history for a document.
pub fn execute(settings: &Settings, file: &str, json: bool) -> Result<()> {
    let document = resolve_document(settings.telos_dir(), file)?;
    let content = load_document(&document)?;
    let index = list_outputs(settings.outputs_dir())?;
    let progress = goal_progress(&document, &content, &index)?;

    if json {
        println!("{}", serde_json::to_string(&progress)?);
        return Ok(());
    }

    println!("{} {}", "Goal progress:".bold(), progress.document);
    println!();
    println!("Goals:          {}", progress.goals_count);
    println!("Analyses:       {}", progress.total_analyses);
    match progress.last_analysis {
        Some(ts) => println!("Last analysis:  {}", format_relative_time(ts, super::now())),
        None => println!("Last analysis:  never"),
    }

    println!();
    if progress.goals.is_empty() {
        println!("No goals found. Add a '## Goals' section with bullet points.");
    } else {
        println!("{}", "Goals".cyan().bold());
        for (i, goal) in progress.goals.iter().enumerate() {
            println!("  {}. {goal}", i + 1);
        }
        if progress.goals_count > progress.goals.len() {
            println!("  ... and {} more", progress.goals_count - progress.goals.len());
        }
    }

    if !progress.patterns_used.is_empty() {
        println!();
        println!("{}", "Patterns used".cyan().bold());
        for pattern in &progress.patterns_used {
            println!("  {}", patterns::title(pattern));
        }
    }

    Ok(())
}
