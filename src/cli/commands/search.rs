//! Search command implementation.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::gemini::GeminiClient;
use crate::insights::{semantic_search, SearchHit};
use crate::model::Document;
use crate::storage::{find_documents, load_document};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    results: &'a [SearchHit],
}

fn relevance_icon(relevance: &str) -> &'static str {
    match relevance {
        "high" => "🎯",
        "medium" => "📌",
        "low" => "📎",
        _ => "📄",
    }
}

/// Load `(file name, content)` pairs, skipping files that cannot be read.
fn readable_documents(docs: &[Document]) -> Vec<(String, String)> {
    docs.iter()
        .filter_map(|doc| match load_document(doc) {
            Ok(content) => Some((doc.file_name.clone(), content)),
            Err(e) => {
                tracing::warn!(file = %doc.file_name, error = %e, "Skipping unreadable document");
                None
            }
        })
        .collect()
}

/// Search every document for `query`.
pub fn execute(settings: &Settings, query: &str, json: bool) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::InvalidArgument("search query is empty".to_string()));
    }

    let documents = readable_documents(&find_documents(settings.telos_dir())?);

    let client = GeminiClient::from_settings(settings)?;
    let rt = super::runtime()?;

    if !json {
        eprintln!("Searching {} files...", documents.len());
    }
    let hits = rt.block_on(semantic_search(&client, query, &documents))?;

    if json {
        let output = SearchOutput {
            query,
            count: hits.len(),
            results: &hits,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results found. Try a different query!");
        return Ok(());
    }

    println!("Found {} relevant result(s)", hits.len());
    for hit in &hits {
        println!();
        println!(
            "{} {} {}",
            relevance_icon(&hit.relevance),
            hit.file.bold(),
            format!("({} relevance)", hit.relevance).dimmed()
        );
        println!("{}", hit.excerpt);
        if !hit.context.is_empty() {
            println!("{} {}", "Why:".cyan(), hit.context);
        }
    }
    Ok(())
}
