//! Analytics command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::insights::{analytics, format_relative_time};
use crate::patterns;
use crate::storage::{find_documents, list_outputs};
use colored::Colorize;

/// Days of timeline shown in text mode.
const TIMELINE_DAYS: usize = 14;

/// Recent entries shown in text mode.
const RECENT_SHOWN: usize = 5;

/// Execute analytics command.
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let documents = find_documents(settings.telos_dir())?;
    let index = list_outputs(settings.outputs_dir())?;
    let stats = analytics(documents.len(), &index);

    if crate::is_csv() {
        println!("date,analyses");
        for (date, count) in &stats.timeline {
            println!("{date},{count}");
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }

    println!("{}", "Telos Analytics".bold());
    println!("===============");
    println!();
    println!("Telos files:     {}", stats.total_files);
    println!("Total analyses:  {}", stats.total_analyses);
    println!("Avg per file:    {:.1}", stats.average_per_file());
    println!("Patterns used:   {}", stats.pattern_usage.len());

    println!();
    println!("{}", "Pattern usage".cyan().bold());
    if stats.pattern_usage.is_empty() {
        println!("  No analyses yet");
    }
    let widest = stats.pattern_usage.first().map_or(0, |u| u.count);
    for usage in &stats.pattern_usage {
        let bar = "█".repeat(usage.count * 20 / widest.max(1));
        println!("  {:<24} {:>4} {}", patterns::title(&usage.pattern), usage.count, bar.green());
    }

    println!();
    println!("{}", "Recent activity".cyan().bold());
    if stats.recent_activity.is_empty() {
        println!("  No recent activity");
    }
    let now = super::now();
    for activity in stats.recent_activity.iter().take(RECENT_SHOWN) {
        println!(
            "  {} {} {}",
            activity.source.bold(),
            patterns::title(&activity.pattern),
            format_relative_time(activity.timestamp, now).dimmed()
        );
    }

    println!();
    println!("{}", "Timeline".cyan().bold());
    if stats.timeline.is_empty() {
        println!("  No timeline data yet");
    }
    let skip = stats.timeline.len().saturating_sub(TIMELINE_DAYS);
    for (date, count) in stats.timeline.iter().skip(skip) {
        println!("  {date} {:>3} {}", count, "▪".repeat(*count));
    }

    Ok(())
}
