//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Overrides;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;

/// Telos CLI - Run persona prompts over your life documents with Gemini
#[derive(Parser, Debug)]
#[command(name = "telos", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (default: gemini-2.5-flash)
    #[arg(long, global = true, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "GEMINI_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Folder holding Telos documents (default: telos)
    #[arg(long, global = true, env = "TELOS_FOLDER")]
    pub telos_dir: Option<PathBuf>,

    /// Folder for saved analyses (default: outputs)
    #[arg(long, global = true, env = "TELOS_OUTPUTS")]
    pub outputs_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Preview changes without writing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            telos_dir: self.telos_dir.clone(),
            outputs_dir: self.outputs_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration and folder summary
    Status,

    /// List analysis patterns by category
    Patterns,

    /// List Telos documents
    Files,

    /// Analyze a document with one pattern or all of them
    Analyze {
        /// Document path, file name, or stem
        file: String,

        /// Pattern to run (e.g. red_team, "Red Team")
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        pattern: Option<String>,

        /// Run every pattern in order
        #[arg(long)]
        all: bool,

        /// Print results without saving them
        #[arg(long)]
        no_save: bool,
    },

    /// Create a new Telos document
    New {
        /// Document name (".md" is appended if missing)
        name: String,

        /// Start from the standard template
        #[arg(long, conflicts_with_all = ["content", "from"])]
        template: bool,

        /// Document content
        #[arg(long, conflicts_with = "from")]
        content: Option<String>,

        /// Copy content from an existing file
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Print the starter template
    Template,

    /// Append a dated journal entry to a document
    Journal {
        /// Document path, file name, or stem
        file: String,

        /// Entry text
        text: String,
    },

    /// Ask the writing assistant about a document
    Assist {
        /// Document path, file name, or stem
        file: String,

        /// Kind of help: mission, goals, challenges, strengths, expand,
        /// improve, analyze-expand, connect
        #[arg(short, long, default_value = "expand")]
        kind: String,
    },

    /// Browse and manage saved analyses
    Outputs {
        #[command(subcommand)]
        command: OutputsCommands,
    },

    /// Search across all documents
    Search {
        /// What to look for
        query: String,
    },

    /// Show usage analytics
    Analytics,

    /// Show goals and analysis history for a document
    Goals {
        /// Document path, file name, or stem
        file: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Outputs Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum OutputsCommands {
    /// List saved analyses grouped by document and pattern
    List {
        /// Only show analyses of this document stem
        #[arg(long)]
        source: Option<String>,
    },

    /// Print a saved analysis
    Show {
        /// Document stem
        source: String,

        /// Pattern name
        pattern: String,

        /// Version to show (1 = newest)
        #[arg(short = 'n', long = "nth", default_value_t = 1)]
        version: usize,
    },

    /// Delete one saved analysis
    Delete {
        /// Document stem
        source: String,

        /// Pattern name
        pattern: String,

        /// Version to delete (1 = newest)
        #[arg(short = 'n', long = "nth", default_value_t = 1)]
        version: usize,
    },

    /// Delete every saved analysis of a document
    Purge {
        /// Document stem
        source: String,

        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Open the outputs folder in the system file browser
    Open,
}
