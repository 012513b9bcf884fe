//! Model-delegated search across documents.
//!
//! Every document goes into a single prompt and the model is asked to
//! answer with JSON. Replies that are not JSON still come back as one hit
//! so the user sees what the model said.

use serde::{Deserialize, Serialize};

use super::compile;
use crate::error::Result;
use crate::gemini::{render_generation, GenerationOptions, TextGenerator};

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default = "unknown_file")]
    pub file: String,
    /// `high`, `medium`, or `low`.
    #[serde(default = "medium")]
    pub relevance: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub context: String,
}

fn unknown_file() -> String {
    "Unknown".to_string()
}

fn medium() -> String {
    "medium".to_string()
}

#[derive(Deserialize)]
struct SearchReply {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl SearchHit {
    fn new(file: &str, relevance: &str, excerpt: String, context: &str) -> Self {
        Self {
            file: file.to_string(),
            relevance: relevance.to_string(),
            excerpt,
            context: context.to_string(),
        }
    }
}

fn search_prompt(query: &str, documents: &[(String, String)]) -> String {
    let files_text = documents
        .iter()
        .map(|(file, content)| format!("FILE: {file}\n{content}"))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        r#"You are a semantic search engine for personal Telos files.

USER QUERY: "{query}"

TELOS FILES:
{files_text}

Find and return the most relevant sections from these files that answer the query.
Format your response as JSON with this structure:
{{
    "results": [
        {{
            "file": "filename.md",
            "relevance": "high/medium/low",
            "excerpt": "relevant text excerpt",
            "context": "why this is relevant"
        }}
    ]
}}

Return only the JSON, no other text."#
    )
}

/// Parse the first `{...}` span of a reply into hits.
fn parse_reply(reply: &str) -> Result<Option<Vec<SearchHit>>> {
    let span = compile(r"(?s)\{.*\}")?;
    let Some(found) = span.find(reply) else {
        return Ok(None);
    };

    Ok(serde_json::from_str::<SearchReply>(found.as_str())
        .ok()
        .map(|parsed| {
            parsed
                .results
                .into_iter()
                .map(|mut hit| {
                    hit.relevance = hit.relevance.trim().to_lowercase();
                    hit
                })
                .collect()
        }))
}

/// Ask the model which parts of `documents` answer `query`.
///
/// `documents` holds `(file name, content)` pairs; blank documents are
/// skipped. With nothing to search the model is not called.
pub async fn semantic_search<G: TextGenerator>(
    generator: &G,
    query: &str,
    documents: &[(String, String)],
) -> Result<Vec<SearchHit>> {
    let documents: Vec<(String, String)> = documents
        .iter()
        .filter(|(_, content)| !content.trim().is_empty())
        .cloned()
        .collect();
    if documents.is_empty() {
        return Ok(Vec::new());
    }

    tracing::info!(files = documents.len(), model = generator.model(), "Searching documents");

    let prompt = search_prompt(query, &documents);
    let reply = match generator.generate(&prompt, &GenerationOptions::plain()).await {
        Ok(generation) => render_generation(&generation),
        Err(e) => {
            tracing::warn!(error = %e, "Search request failed");
            return Ok(vec![SearchHit::new("Error", "low", e.to_string(), "Search failed")]);
        }
    };

    match parse_reply(&reply)? {
        Some(hits) => Ok(hits),
        None => {
            tracing::debug!("Search reply was not JSON");
            Ok(vec![SearchHit::new("All Files", "medium", reply, "Search results")])
        }
    }
}
