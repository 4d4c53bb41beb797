use crate::escape::escape_html;

/// Highlights a code sample that is not a single symbol reference.
pub trait SyntaxHighlighter: Sync {
    fn highlight(&self, source: &str) -> String;
}

/// Fallback highlighter: escapes the source and applies no styling.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl SyntaxHighlighter for PlainHighlighter {
    fn highlight(&self, source: &str) -> String {
        escape_html(source)
    }
}
