use doclink_core::{SyntaxHighlighter, escape_html};
use log::debug;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

const DEFAULT_LANGUAGE: &str = "PHP Source";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Theme::Auto),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Highlights code samples with syntect, emitting inline-styled spans.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: SyntectTheme,
    language: String,
}

impl SyntectHighlighter {
    pub fn new(theme: Theme) -> Self {
        let theme_set = ThemeSet::load_defaults();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: pick_theme(theme, &theme_set),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the language by syntax name (`PHP Source`) or token (`rs`, `php`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn syntax(&self) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_name(&self.language)
            .or_else(|| self.syntax_set.find_syntax_by_token(&self.language))
            .unwrap_or_else(|| {
                debug!(language = self.language.as_str(); "Unknown language, using plain text");
                self.syntax_set.find_syntax_plain_text()
            })
    }
}

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(&self, source: &str) -> String {
        let mut highlighter = HighlightLines::new(self.syntax(), &self.theme);
        let mut out = String::with_capacity(source.len() * 4);
        for line in LinesWithEndings::from(source) {
            out.push_str(&highlight_line(line, &self.syntax_set, &mut highlighter));
        }
        out
    }
}

fn pick_theme(theme: Theme, theme_set: &ThemeSet) -> SyntectTheme {
    let candidates = match theme {
        Theme::Dark => ["Monokai Extended Bright", "Monokai Extended", "base16-ocean.dark"],
        Theme::Light => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
        Theme::Auto => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
    };
    candidates
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
        .cloned()
        .unwrap_or_default()
}

fn highlight_line(
    line: &str,
    syntax_set: &SyntaxSet,
    highlighter: &mut HighlightLines,
) -> String {
    match highlighter.highlight_line(line, syntax_set) {
        Ok(ranges) => match styled_line_to_highlighted_html(&ranges, IncludeBackground::No) {
            Ok(html) => strip_font_weight(&html),
            Err(_) => escape_html(line),
        },
        Err(_) => escape_html(line),
    }
}

fn strip_font_weight(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find("font-weight:") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + "font-weight:".len()..];
        let end = match tail.find(';') {
            Some(index) => index + 1,
            None => {
                rest = "";
                break;
            }
        };
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::{SyntectHighlighter, Theme, strip_font_weight};
    use doclink_core::SyntaxHighlighter;

    #[test]
    fn highlights_with_inline_styles() {
        let highlighter = SyntectHighlighter::new(Theme::Light).with_language("rs");
        let html = highlighter.highlight("let x = 1;\nlet y = x;\n");
        assert!(html.contains("style=\""));
        assert!(html.contains("let"));
        assert!(!html.contains("font-weight"));
    }

    #[test]
    fn unknown_language_still_escapes() {
        let highlighter = SyntectHighlighter::new(Theme::Dark).with_language("no-such-lang");
        let html = highlighter.highlight("a < b && c");
        assert!(html.contains("&lt;"));
        assert!(!html.contains(" < "));
    }

    #[test]
    fn font_weight_declarations_are_removed() {
        assert_eq!(
            strip_font_weight("<span style=\"color:#000;font-weight:bold;\">x</span>"),
            "<span style=\"color:#000;\">x</span>"
        );
    }

    #[test]
    fn theme_names_parse() {
        assert_eq!(Theme::from_name("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name("sepia"), None);
    }
}
