//! Error types for the Telos CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 7=config, etc.)
//! - Retryability flags
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Telos operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    DocumentNotFound,
    PatternNotFound,
    OutputNotFound,

    // Validation (exit 4)
    InvalidArgument,
    AlreadyExists,
    ConfirmationRequired,

    // Config (exit 7)
    MissingApiKey,
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Model API (exit 9)
    ModelError,
    RateLimited,
    ModelUnavailable,
    NetworkError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::PatternNotFound => "PATTERN_NOT_FOUND",
            Self::OutputNotFound => "OUTPUT_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::ConfirmationRequired => "CONFIRMATION_REQUIRED",
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::ModelError => "MODEL_ERROR",
            Self::RateLimited => "RATE_LIMITED",
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
            Self::NetworkError => "NETWORK_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DocumentNotFound | Self::PatternNotFound | Self::OutputNotFound => 3,
            Self::InvalidArgument | Self::AlreadyExists | Self::ConfirmationRequired => 4,
            Self::MissingApiKey | Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::ModelError | Self::RateLimited | Self::ModelUnavailable | Self::NetworkError => 9,
        }
    }

    /// Whether running the same command again later may succeed.
    ///
    /// Nothing is retried automatically; this only informs the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ModelUnavailable | Self::NetworkError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Telos operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("GEMINI_API_KEY not found")]
    MissingApiKey,

    #[error("Document not found: {name}")]
    DocumentNotFound { name: String, similar: Vec<String> },

    #[error("Document already exists: {}", path.display())]
    DocumentExists { path: PathBuf },

    #[error("Unknown pattern: {name}")]
    PatternNotFound { name: String, similar: Vec<String> },

    #[error("Output not found: {name}")]
    OutputNotFound { name: String },

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingApiKey => ErrorCode::MissingApiKey,
            Self::DocumentNotFound { .. } => ErrorCode::DocumentNotFound,
            Self::DocumentExists { .. } => ErrorCode::AlreadyExists,
            Self::PatternNotFound { .. } => ErrorCode::PatternNotFound,
            Self::OutputNotFound { .. } => ErrorCode::OutputNotFound,
            Self::ConfirmationRequired(_) => ErrorCode::ConfirmationRequired,
            Self::Api { status, .. } => match *status {
                429 => ErrorCode::RateLimited,
                500..=599 => ErrorCode::ModelUnavailable,
                _ => ErrorCode::ModelError,
            },
            Self::Http(e) if e.is_connect() || e.is_timeout() => ErrorCode::NetworkError,
            Self::Http(_) => ErrorCode::ModelError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingApiKey => Some(
                "Set it in your environment or in a .env file:\n  \
                 GEMINI_API_KEY=your-key"
                    .to_string(),
            ),

            Self::DocumentNotFound { similar, .. } if !similar.is_empty() => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }
            Self::DocumentNotFound { .. } => Some(
                "Use `telos files` to list documents, or `telos new <name>` to create one."
                    .to_string(),
            ),

            Self::DocumentExists { .. } => {
                Some("Choose a different name, or append with `telos journal`.".to_string())
            }

            Self::PatternNotFound { similar, .. } if !similar.is_empty() => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }
            Self::PatternNotFound { .. } => {
                Some("Use `telos patterns` to see available patterns.".to_string())
            }

            Self::OutputNotFound { .. } => {
                Some("Use `telos outputs list` to see saved analyses.".to_string())
            }

            Self::ConfirmationRequired(_) => Some("Re-run with --yes to confirm.".to_string()),

            Self::Api { status: 401 | 403, .. } => {
                Some("Your API key may be invalid or expired.".to_string())
            }
            Self::Api { status: 429, .. } => {
                Some("You've hit the API rate limit. Wait a moment and try again.".to_string())
            }

            Self::Http(_) => Some("Check your internet connection.".to_string()),

            Self::Config(_) => Some(
                "Check GEMINI_ENDPOINT and GEMINI_MODEL in your environment or .env.".to_string(),
            ),

            Self::Api { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
