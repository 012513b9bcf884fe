//! Read-only `.env` file support.
//!
//! Values are looked up from the parsed file; the process environment is
//! never modified. Real environment variables always win over the file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parsed `KEY=VALUE` pairs from a `.env` file.
#[derive(Debug, Default, Clone)]
pub struct DotEnv {
    values: HashMap<String, String>,
}

impl DotEnv {
    /// Load `.env` from the given directory.
    ///
    /// A missing or unreadable file yields an empty set.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(".env");
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Self::parse(&content)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse `.env` content.
    ///
    /// Supports `#` comments, blank lines, an optional `export ` prefix,
    /// and single or double quoted values.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let line = line.strip_prefix("export ").unwrap_or(line);
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), unquote(value.trim()).to_string()))
            })
            .collect();

        Self { values }
    }

    /// Get a non-empty value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    // Unquoted values may carry a trailing comment.
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic() {
        let env = DotEnv::parse(
            "# comment\nGEMINI_API_KEY=abc123\n\nexport GEMINI_MODEL=\"gemini-2.5-pro\"\nTELOS_FOLDER='my docs'\n",
        );
        assert_eq!(env.get("GEMINI_API_KEY"), Some("abc123"));
        assert_eq!(env.get("GEMINI_MODEL"), Some("gemini-2.5-pro"));
        assert_eq!(env.get("TELOS_FOLDER"), Some("my docs"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_parse_trailing_comment_and_empty() {
        let env = DotEnv::parse("A=value # note\nB=\n=orphan\nnot a pair\n");
        assert_eq!(env.get("A"), Some("value"));
        assert_eq!(env.get("B"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let env = DotEnv::load(temp_dir.path());
        assert_eq!(env.get("GEMINI_API_KEY"), None);
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(".env"), "GEMINI_API_KEY=from-file\n").unwrap();
        let env = DotEnv::load(temp_dir.path());
        assert_eq!(env.get("GEMINI_API_KEY"), Some("from-file"));
    }
}
