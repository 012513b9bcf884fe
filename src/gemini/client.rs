//! HTTP client for the Gemini `generateContent` endpoint.

use crate::error::{Error, Result};
use std::time::Duration;

use super::provider::TextGenerator;
use super::types::{
    ErrorWrapper, GenerateContentRequest, GenerateContentResponse, Generation, GenerationOptions,
};

/// Per-request timeout. Long documents can take a while to analyze.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Gemini API client.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not an http(s) URL or
    /// the model name is blank.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(Error::Config(format!(
                "GEMINI_ENDPOINT must be an http(s) URL, got '{endpoint}'"
            )));
        }

        let model = model.into().trim().to_string();
        if model.is_empty() || model == "models/" {
            return Err(Error::Config("GEMINI_MODEL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key: api_key.into(),
        })
    }

    /// Create a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if no key is configured.
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?;
        Self::new(&settings.endpoint, &settings.model, api_key)
    }

    fn url(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{model}:generateContent", self.endpoint)
    }
}

impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        let request = GenerateContentRequest::new(prompt, options);

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            max_output_tokens = ?options.max_output_tokens,
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let generation = Generation::from(parsed);

        tracing::debug!(
            finish_reason = %generation.finish_reason,
            response_chars = generation.text.as_ref().map_or(0, |t| t.chars().count()),
            "Received generateContent response"
        );

        Ok(generation)
    }
}

/// Map a non-2xx status and its body to an API error.
fn api_error(status: u16, body: &str) -> Error {
    Error::Api {
        status,
        message: error_message(body),
    }
}

/// Pull a readable message out of an API error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status.filter(|s| !s.is_empty()) {
                Some(status) => format!("{status}: {message}"),
                None => message,
            })
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = GeminiClient::new(
            "https://generativelanguage.googleapis.com/v1beta/",
            "gemini-2.5-flash",
            "key",
        )
        .unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_url_accepts_prefixed_model() {
        let client = GeminiClient::new("http://localhost:9", "models/gemini-pro", "key").unwrap();
        assert_eq!(client.url(), "http://localhost:9/models/gemini-pro:generateContent");
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "INVALID_ARGUMENT: API key not valid.");
    }

    #[test]
    fn test_api_error_from_status_and_body() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded.", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = api_error(429, body);
        match &err {
            Error::Api { status, message } => {
                assert_eq!(*status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.error_code(), crate::error::ErrorCode::RateLimited);
        assert!(crate::gemini::render_failure(&err).contains("Rate Limit Reached"));

        let err = api_error(403, r#"{"error": {"message": "API key not valid."}}"#);
        assert_eq!(err.to_string(), "Model API error (403): API key not valid.");
        assert!(crate::gemini::render_failure(&err).contains("Authentication Error"));

        let err = api_error(502, "<html>Bad Gateway</html>\n");
        assert_eq!(err.to_string(), "Model API error (502): <html>Bad Gateway</html>");
        assert_eq!(err.error_code(), crate::error::ErrorCode::ModelUnavailable);
    }

    #[test]
    fn test_new_rejects_malformed_settings() {
        for endpoint in ["", "generativelanguage.googleapis.com", "ftp://host"] {
            assert!(matches!(
                GeminiClient::new(endpoint, "gemini-2.5-flash", "key"),
                Err(Error::Config(_))
            ));
        }
        let err = GeminiClient::new("https://host/v1beta", "  ", "key").err().unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_error_message_plain_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = crate::config::Settings::resolve_with(
            crate::config::Overrides::default(),
            &crate::config::DotEnv::default(),
        );
        assert!(matches!(
            GeminiClient::from_settings(&settings),
            Err(Error::MissingApiKey)
        ));
    }
}
