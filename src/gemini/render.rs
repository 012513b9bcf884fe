//! Turn model replies and failures into user-facing markdown.
//!
//! Every analysis ends in markdown that is shown and saved, so failures
//! are rendered rather than propagated.

use super::types::{FinishReason, Generation};
use crate::error::Error;

const TRUNCATION_NOTE: &str = "\n\n✂️ **Response truncated due to maximum token limit.**\n\n\
     💡 *Tip: Try using a shorter Telos file or run a more focused analysis pattern.*";

/// Render a reply: its text when present, otherwise an explanation.
#[must_use]
pub fn render_generation(generation: &Generation) -> String {
    if let Some(text) = generation.text.as_deref() {
        return if generation.finish_reason == FinishReason::MaxTokens {
            format!("{text}{TRUNCATION_NOTE}")
        } else {
            text.to_string()
        };
    }

    if generation.block_reason.is_some() {
        return safety_message();
    }

    match &generation.finish_reason {
        FinishReason::MaxTokens => "⚠️ **Response Truncated**\n\n\
             The response was cut off because it reached the maximum token limit and returned no content.\n\n\
             **Possible solutions:**\n\
             - Your Telos file might be too long. Try splitting it into smaller sections.\n\
             - The analysis pattern generated too much output. Try a different pattern.\n\
             - Consider using a model with higher token limits."
            .to_string(),
        FinishReason::Safety => safety_message(),
        FinishReason::Recitation => "📋 **Recitation Blocked**\n\n\
             The response was blocked for potential recitation of copyrighted material."
            .to_string(),
        FinishReason::Other(reason) => format!(
            "⚠️ **Unknown Error**\n\nFinish reason: {reason}\n\n\
             Try running the analysis again or use a different pattern."
        ),
        FinishReason::Stop | FinishReason::Unspecified => {
            let reason = if generation.has_candidates {
                generation.finish_reason.to_string()
            } else {
                "no candidates".to_string()
            };
            format!(
                "⚠️ **Could not extract text from response**\n\n\
                 Finish reason: {reason}\n\n\
                 Try using a shorter Telos file or a different model."
            )
        }
    }
}

/// Render a failed call.
#[must_use]
pub fn render_failure(error: &Error) -> String {
    let message = error.to_string();
    let lower = message.to_lowercase();

    let is_auth = matches!(error, Error::Api { status: 401 | 403, .. } | Error::MissingApiKey)
        || message.contains("API_KEY")
        || lower.contains("api key")
        || lower.contains("authentication");
    let is_rate = matches!(error, Error::Api { status: 429, .. })
        || lower.contains("quota")
        || lower.contains("rate limit")
        || lower.contains("resource_exhausted");

    if is_auth {
        "❌ **Authentication Error**\n\n\
         Your API key may be invalid or expired. Check your `.env` file."
            .to_string()
    } else if is_rate {
        "⏸️ **Rate Limit Reached**\n\n\
         You've hit the API rate limit. Wait a moment and try again."
            .to_string()
    } else if lower.contains("safety") {
        safety_message()
    } else {
        format!(
            "❌ **Error**\n\n{message}\n\n\
             If this persists, check your internet connection and API key."
        )
    }
}

fn safety_message() -> String {
    "🛡️ **Safety Filter Triggered**\n\n\
     The AI declined to respond due to safety settings. Try rephrasing your Telos content."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(render_generation(&Generation::text("All good")), "All good");
    }

    #[test]
    fn test_truncated_text_gets_note() {
        let mut generation = Generation::text("Partial");
        generation.finish_reason = FinishReason::MaxTokens;
        let rendered = render_generation(&generation);
        assert!(rendered.starts_with("Partial"));
        assert!(rendered.contains("Response truncated"));
    }

    #[test]
    fn test_empty_reply_by_finish_reason() {
        let cases = [
            (FinishReason::MaxTokens, "Response Truncated"),
            (FinishReason::Safety, "Safety Filter Triggered"),
            (FinishReason::Recitation, "Recitation Blocked"),
            (FinishReason::Other("BLOCKLIST".into()), "Finish reason: BLOCKLIST"),
            (FinishReason::Stop, "Could not extract text"),
        ];
        for (reason, expected) in cases {
            let rendered = render_generation(&Generation::empty(reason));
            assert!(rendered.contains(expected), "{rendered}");
        }
    }

    #[test]
    fn test_blocked_prompt() {
        let generation = Generation {
            text: None,
            finish_reason: FinishReason::Unspecified,
            block_reason: Some("OTHER".into()),
            has_candidates: false,
        };
        assert!(render_generation(&generation).contains("Safety Filter Triggered"));
    }

    #[test]
    fn test_no_candidates() {
        let generation = Generation {
            text: None,
            finish_reason: FinishReason::Unspecified,
            block_reason: None,
            has_candidates: false,
        };
        assert!(render_generation(&generation).contains("no candidates"));
    }

    #[test]
    fn test_failure_classification() {
        let auth = Error::Api { status: 403, message: "PERMISSION_DENIED".into() };
        assert!(render_failure(&auth).contains("Authentication Error"));

        let bad_key = Error::Api { status: 400, message: "INVALID_ARGUMENT: API key not valid.".into() };
        assert!(render_failure(&bad_key).contains("Authentication Error"));

        let quota = Error::Api { status: 429, message: "RESOURCE_EXHAUSTED".into() };
        assert!(render_failure(&quota).contains("Rate Limit Reached"));

        let safety = Error::Other("blocked by safety system".into());
        assert!(render_failure(&safety).contains("Safety Filter Triggered"));

        let transport = Error::Other("error sending request for url (/models/x:generateContent)".into());
        assert!(render_failure(&transport).starts_with("❌ **Error**"));

        let other = Error::Api { status: 500, message: "internal".into() };
        let rendered = render_failure(&other);
        assert!(rendered.starts_with("❌ **Error**"));
        assert!(rendered.contains("internal"));
    }
}
