//! Telos CLI - Run persona prompts over your life documents with Gemini
//!
//! This crate provides the core functionality for the `telos` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`patterns`] - Built-in analysis patterns and writing-assistant prompts
//! - [`gemini`] - Generation API client and reply rendering
//! - [`analysis`] - Section splitting and prompt orchestration
//! - [`model`] - Data types (Document, OutputRecord, OutputIndex)
//! - [`storage`] - Filesystem layer for documents and saved analyses
//! - [`insights`] - Goals, analytics, relative time, and search
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod insights;
pub mod model;
pub mod patterns;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};

/// Global dry-run flag for `--dry-run`.
///
/// When set, mutate commands preview what would happen without writing.
pub static DRY_RUN: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if dry-run mode is active.
#[inline]
pub fn is_dry_run() -> bool {
    DRY_RUN.load(std::sync::atomic::Ordering::Relaxed)
}

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
