//! Request/response types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Generation options ───────────────────────────────────────

/// Sampling and safety options for one call.
///
/// `None` fields are omitted from the request so the API default applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub candidate_count: Option<u32>,
    /// Send `BLOCK_NONE` for every adjustable harm category.
    pub relaxed_safety: bool,
}

impl GenerationOptions {
    /// Whole-document analysis.
    #[must_use]
    pub const fn analysis() -> Self {
        Self {
            temperature: Some(0.7),
            max_output_tokens: Some(8192),
            candidate_count: Some(1),
            relaxed_safety: true,
        }
    }

    /// One section of an oversized document.
    #[must_use]
    pub const fn section() -> Self {
        Self {
            temperature: Some(0.7),
            max_output_tokens: Some(4096),
            candidate_count: Some(1),
            relaxed_safety: true,
        }
    }

    /// API defaults (search and writing assistance).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            temperature: None,
            max_output_tokens: None,
            candidate_count: None,
            relaxed_safety: false,
        }
    }
}

// ── Finish reason ────────────────────────────────────────────

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
    Unspecified,
}

impl FinishReason {
    /// Parse the API's enum name, or the legacy numeric code.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "STOP" | "1" => Self::Stop,
            "MAX_TOKENS" | "2" => Self::MaxTokens,
            "SAFETY" | "3" => Self::Safety,
            "RECITATION" | "4" => Self::Recitation,
            "" | "FINISH_REASON_UNSPECIFIED" | "0" => Self::Unspecified,
            "5" => Self::Other("OTHER".to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => f.write_str("STOP"),
            Self::MaxTokens => f.write_str("MAX_TOKENS"),
            Self::Safety => f.write_str("SAFETY"),
            Self::Recitation => f.write_str("RECITATION"),
            Self::Other(raw) => f.write_str(raw),
            Self::Unspecified => f.write_str("unknown"),
        }
    }
}

/// The useful part of one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Concatenated text parts of the first candidate, if any.
    pub text: Option<String>,
    pub finish_reason: FinishReason,
    /// Set when the prompt itself was blocked and no candidate exists.
    pub block_reason: Option<String>,
    /// Whether the reply carried any candidate at all.
    pub has_candidates: bool,
}

impl Generation {
    /// A normal, complete text reply.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: FinishReason::Stop,
            block_reason: None,
            has_candidates: true,
        }
    }

    /// A reply with no text and the given finish reason.
    #[must_use]
    pub fn empty(finish_reason: FinishReason) -> Self {
        Self {
            text: None,
            finish_reason,
            block_reason: None,
            has_candidates: true,
        }
    }
}

// ── Wire format ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

impl<'a> GenerateContentRequest<'a> {
    pub fn new(prompt: &'a str, options: &GenerationOptions) -> Self {
        let generation_config = (options.temperature.is_some()
            || options.max_output_tokens.is_some()
            || options.candidate_count.is_some())
        .then_some(GenerationConfig {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
            candidate_count: options.candidate_count,
        });

        let safety_settings = if options.relaxed_safety {
            HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
            safety_settings,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartResponse {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorWrapper {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl From<GenerateContentResponse> for Generation {
    fn from(response: GenerateContentResponse) -> Self {
        let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
        let has_candidates = !response.candidates.is_empty();

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Self {
                text: None,
                finish_reason: FinishReason::Unspecified,
                block_reason,
                has_candidates,
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Self {
            text: (!text.is_empty()).then_some(text),
            finish_reason: candidate
                .finish_reason
                .as_deref()
                .map_or(FinishReason::Unspecified, FinishReason::parse),
            block_reason,
            has_candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_parse() {
        assert_eq!(FinishReason::parse("STOP"), FinishReason::Stop);
        assert_eq!(FinishReason::parse("MAX_TOKENS"), FinishReason::MaxTokens);
        assert_eq!(FinishReason::parse("2"), FinishReason::MaxTokens);
        assert_eq!(FinishReason::parse("3"), FinishReason::Safety);
        assert_eq!(FinishReason::parse("RECITATION"), FinishReason::Recitation);
        assert_eq!(
            FinishReason::parse("BLOCKLIST"),
            FinishReason::Other("BLOCKLIST".to_string())
        );
        assert_eq!(FinishReason::parse(""), FinishReason::Unspecified);
    }

    #[test]
    fn test_request_with_relaxed_safety() {
        let request = GenerateContentRequest::new("hello", &GenerationOptions::analysis());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["generationConfig"]["candidateCount"], 1);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_NONE");
    }

    #[test]
    fn test_plain_request_omits_config() {
        let request = GenerateContentRequest::new("hello", &GenerationOptions::plain());
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("generationConfig").is_none());
        assert!(json.get("safetySettings").is_none());
    }

    #[test]
    fn test_response_into_generation() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}], "role": "model"},
                "finishReason": "MAX_TOKENS"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let generation = Generation::from(response);

        assert_eq!(generation.text.as_deref(), Some("Hello world"));
        assert_eq!(generation.finish_reason, FinishReason::MaxTokens);
        assert!(generation.has_candidates);
    }

    #[test]
    fn test_blocked_prompt_response() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let generation = Generation::from(response);

        assert!(generation.text.is_none());
        assert!(!generation.has_candidates);
        assert_eq!(generation.block_reason.as_deref(), Some("SAFETY"));
    }

    #[test]
    fn test_candidate_without_content() {
        let raw = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let generation = Generation::from(response);

        assert!(generation.text.is_none());
        assert_eq!(generation.finish_reason, FinishReason::Safety);
    }
}
