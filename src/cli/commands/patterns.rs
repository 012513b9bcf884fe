//! Patterns command implementation.

use crate::error::Result;
use crate::patterns::{self, Category};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct PatternInfo {
    name: &'static str,
    title: String,
    category: &'static str,
}

#[derive(Serialize)]
struct PatternListOutput {
    count: usize,
    patterns: Vec<PatternInfo>,
}

fn print_category(category: &Category) {
    println!("{} {}", category.icon, category.name.bold());
    for pattern in category.patterns {
        println!("  {:<24} {}", pattern.name.cyan(), pattern.title().dimmed());
    }
    println!();
}

/// Execute patterns command.
pub fn execute(json: bool) -> Result<()> {
    if crate::is_csv() {
        println!("name,title,category");
        for p in patterns::all() {
            println!("{},{},{}", p.name, p.title(), crate::csv_escape(p.category));
        }
    } else if json {
        let patterns: Vec<PatternInfo> = patterns::all()
            .map(|p| PatternInfo {
                name: p.name,
                title: p.title(),
                category: p.category,
            })
            .collect();
        let output = PatternListOutput {
            count: patterns.len(),
            patterns,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Patterns ({}):", patterns::count());
        println!();
        for category in patterns::categories() {
            print_category(category);
        }
        println!("Run one with: telos analyze <file> --pattern <name>");
    }

    Ok(())
}
