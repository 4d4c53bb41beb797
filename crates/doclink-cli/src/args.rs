//! Command-line argument definitions for the `doclink` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Render documentation comments with resolved cross-references
#[derive(Parser, Debug)]
#[command(name = "doclink", author, version, about, long_about = None)]
pub struct Args {
    /// Symbol table (JSON) used to resolve references
    #[arg(short, long)]
    pub symbols: Option<PathBuf>,

    /// Element the text belongs to, e.g. `App\User::save()`
    #[arg(long)]
    pub context: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Unwrap {@internal} tags instead of dropping them
    #[arg(long)]
    pub show_internal: bool,

    /// Clean the rendered HTML against the allow-list
    #[arg(long)]
    pub sanitize: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render free text (read from stdin when TEXT is absent)
    Doc {
        /// Render block markup instead of a single line
        #[arg(long)]
        block: bool,
        text: Option<String>,
    },
    /// Render the short and long description of the context element
    Describe,
    /// Render one annotation value
    Annotation { name: String, value: Option<String> },
    /// Render the type links of a type-bearing value
    Types { value: String },
    /// Resolve one reference
    Link { definition: String },
    /// Link a single symbol or highlight a code sample
    Highlight {
        source: Option<String>,
        /// Syntax name or file extension, overriding the configuration
        #[arg(long)]
        language: Option<String>,
    },
}
