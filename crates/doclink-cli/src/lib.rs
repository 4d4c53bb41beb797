//! CLI logic for the `doclink` binary.
//!
//! Loads the symbol table and configuration, picks the context element and
//! renders whatever the subcommand asks for.

mod args;
mod config;

pub use args::{Args, Command};
pub use config::{AppConfig, ConfigError, load_config};

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use doclink_core::{
    CommonMark, DocRenderer, Element, HtmlLinks, MarkupMode, RenderConfig, SymbolTable,
    SymbolTableError,
};
use doclink_renderer::{SyntectHighlighter, Theme};
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] io::Error),

    #[error(transparent)]
    SymbolTable(#[from] SymbolTableError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown context element: {0}")]
    UnknownContext(String),

    #[error("Unknown highlight theme: {0}")]
    UnknownTheme(String),
}

/// Run the CLI and return the rendered HTML.
///
/// # Errors
///
/// Returns `CliError` when the configuration, symbol table or input cannot
/// be read, or when the requested context element does not exist. Rendering
/// itself does not fail.
pub fn run(args: &Args) -> Result<String, CliError> {
    let config = load_config(args.config.as_deref())?;
    let render_config = RenderConfig {
        show_internal: args.show_internal || config.render.show_internal,
        sanitize: args.sanitize || config.render.sanitize,
    };

    let table = match &args.symbols {
        Some(path) => SymbolTable::from_json(&read_file(path)?)?,
        None => SymbolTable::new(),
    };
    let context = match &args.context {
        Some(path) => table
            .element(path)
            .cloned()
            .ok_or_else(|| CliError::UnknownContext(path.clone()))?,
        None => Element::global(),
    };
    debug!(context = context.display_name(), symbols = table.len(); "Prepared renderer");

    let links = HtmlLinks::with_base_url(config.links.base_url.as_str());
    let markup = CommonMark::new();
    let renderer = DocRenderer::new(&table, &links, &markup, render_config);

    let output = match &args.command {
        Command::Doc { block, text } => {
            let text = text_or_stdin(text.as_deref())?;
            let mode = if *block {
                MarkupMode::Block
            } else {
                MarkupMode::Line
            };
            renderer.doc(&text, &context, mode)
        }
        Command::Describe => {
            let short = renderer.short_description(&context, MarkupMode::Line);
            let long = renderer.long_description(&context);
            [short, long]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        }
        Command::Annotation { name, value } => {
            let value = text_or_stdin(value.as_deref())?;
            renderer.annotation(name, value.trim(), &context)
        }
        Command::Types { value } => renderer.type_links(value, &context),
        Command::Link { definition } => renderer.resolve_link(definition, &context),
        Command::Highlight { source, language } => {
            let source = text_or_stdin(source.as_deref())?;
            let theme = Theme::from_name(&config.highlight.theme)
                .ok_or_else(|| CliError::UnknownTheme(config.highlight.theme.clone()))?;
            let mut highlighter = SyntectHighlighter::new(theme);
            if let Some(language) = language.as_ref().or(config.highlight.language.as_ref()) {
                highlighter = highlighter.with_language(language.as_str());
            }
            renderer.highlight_code(&source, &context, &highlighter)
        }
    };

    info!(length = output.len(); "Rendered output");
    Ok(output)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn text_or_stdin(text: Option<&str>) -> Result<String, CliError> {
    match text {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}
