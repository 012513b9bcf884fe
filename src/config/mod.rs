//! Configuration management.
//!
//! Resolves the API key, model name, and folder locations.
//!
//! Priority for every setting:
//! 1. Explicit CLI flag (clap also fills flags from the environment)
//! 2. `.env` file in the working directory
//! 3. Built-in default
//!
//! Environment variables:
//! - `GEMINI_API_KEY` - API key for the generation API
//! - `GEMINI_MODEL` - Model name (default: `gemini-2.5-flash`)
//! - `GEMINI_ENDPOINT` - API base URL
//! - `TELOS_FOLDER` - Folder holding Telos documents (default: `telos`)
//! - `TELOS_OUTPUTS` - Folder for saved analyses (default: `outputs`)

mod dotenv;

pub use dotenv::DotEnv;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TELOS_FOLDER: &str = "telos";
pub const DEFAULT_OUTPUTS_FOLDER: &str = "outputs";

/// Values given on the command line (or via clap's `env` fallback).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub telos_dir: Option<PathBuf>,
    pub outputs_dir: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    telos_dir: PathBuf,
    outputs_dir: PathBuf,
}

impl Settings {
    /// Resolve settings using the `.env` file in the current directory.
    #[must_use]
    pub fn resolve(overrides: Overrides) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_with(overrides, &DotEnv::load(&cwd))
    }

    /// Resolve settings against an explicit `.env` set.
    #[must_use]
    pub fn resolve_with(overrides: Overrides, dotenv: &DotEnv) -> Self {
        let pick = |flag: Option<String>, key: &str, default: &str| -> String {
            flag.filter(|v| !v.trim().is_empty())
                .or_else(|| dotenv.get(key).map(ToString::to_string))
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = overrides
            .api_key
            .filter(|v| !v.trim().is_empty())
            .or_else(|| dotenv.get("GEMINI_API_KEY").map(ToString::to_string));

        let settings = Self {
            api_key,
            model: pick(overrides.model, "GEMINI_MODEL", DEFAULT_MODEL),
            endpoint: pick(overrides.endpoint, "GEMINI_ENDPOINT", DEFAULT_ENDPOINT),
            telos_dir: PathBuf::from(pick(
                overrides.telos_dir.map(|p| p.to_string_lossy().into_owned()),
                "TELOS_FOLDER",
                DEFAULT_TELOS_FOLDER,
            )),
            outputs_dir: PathBuf::from(pick(
                overrides.outputs_dir.map(|p| p.to_string_lossy().into_owned()),
                "TELOS_OUTPUTS",
                DEFAULT_OUTPUTS_FOLDER,
            )),
        };

        tracing::debug!(
            model = %settings.model,
            telos_dir = %settings.telos_dir.display(),
            outputs_dir = %settings.outputs_dir.display(),
            has_api_key = settings.api_key.is_some(),
            "Resolved settings"
        );

        settings
    }

    /// The API key, required by every command that calls the model.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Folder holding Telos documents.
    #[must_use]
    pub fn telos_dir(&self) -> &Path {
        &self.telos_dir
    }

    /// Root folder for saved analyses.
    #[must_use]
    pub fn outputs_dir(&self) -> &Path {
        &self.outputs_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve_with(Overrides::default(), &DotEnv::default());
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.telos_dir(), Path::new("telos"));
        assert_eq!(settings.outputs_dir(), Path::new("outputs"));
        assert!(!settings.has_api_key());
        assert!(matches!(settings.require_api_key(), Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_dotenv_fills_gaps() {
        let dotenv = DotEnv::parse("GEMINI_API_KEY=file-key\nGEMINI_MODEL=file-model\nTELOS_FOLDER=docs\n");
        let settings = Settings::resolve_with(Overrides::default(), &dotenv);
        assert_eq!(settings.require_api_key().unwrap(), "file-key");
        assert_eq!(settings.model, "file-model");
        assert_eq!(settings.telos_dir(), Path::new("docs"));
    }

    #[test]
    fn test_flags_win_over_dotenv() {
        let dotenv = DotEnv::parse("GEMINI_API_KEY=file-key\nGEMINI_MODEL=file-model\n");
        let overrides = Overrides {
            api_key: Some("flag-key".into()),
            model: Some("flag-model".into()),
            outputs_dir: Some(PathBuf::from("/tmp/out")),
            ..Overrides::default()
        };
        let settings = Settings::resolve_with(overrides, &dotenv);
        assert_eq!(settings.require_api_key().unwrap(), "flag-key");
        assert_eq!(settings.model, "flag-model");
        assert_eq!(settings.outputs_dir(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let overrides = Overrides {
            api_key: Some("   ".into()),
            model: Some(String::new()),
            ..Overrides::default()
        };
        let settings = Settings::resolve_with(overrides, &DotEnv::default());
        assert!(!settings.has_api_key());
        assert_eq!(settings.model, DEFAULT_MODEL);
    }
}
