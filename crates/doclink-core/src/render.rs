use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RenderConfig;
use crate::element::Element;
use crate::escape::{escape_html, unescape_html};
use crate::highlight::SyntaxHighlighter;
use crate::inline::{replace_link_tags, strip_internal_tags};
use crate::link::{LinkRenderer, is_absolute_uri};
use crate::markup::MarkupEngine;
use crate::resolver::{Resolution, SymbolResolver};
use crate::sanitize::sanitize_html;
use crate::types::{TypeList, split_types, strip_array_suffix};

static PRESERVED_SPANS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<code>.*?</code>|<pre>.*?</pre>").expect("valid preserved-span pattern")
});
static INDENTED_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[\t ]+").expect("valid indented-break pattern"));

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkupMode {
    /// Inline markup only, for one-line texts such as short descriptions.
    Line,
    /// Full block markup.
    Block,
}

/// Renders comment texts and annotation values of documented elements.
///
/// All collaborators are borrowed read-only; rendering never fails and every
/// entry point degrades to escaped text when a reference cannot be resolved.
#[derive(Clone, Copy)]
pub struct DocRenderer<'a> {
    resolver: &'a dyn SymbolResolver,
    links: &'a dyn LinkRenderer,
    markup: &'a dyn MarkupEngine,
    config: RenderConfig,
}

impl<'a> DocRenderer<'a> {
    pub fn new(
        resolver: &'a dyn SymbolResolver,
        links: &'a dyn LinkRenderer,
        markup: &'a dyn MarkupEngine,
        config: RenderConfig,
    ) -> Self {
        Self {
            resolver,
            links,
            markup,
            config,
        }
    }

    /// Runs the comment pipeline: internal tags, markup, link tags, and the
    /// optional sanitizer, in that order.
    pub fn doc(&self, text: &str, context: &Element, mode: MarkupMode) -> String {
        let text = strip_internal_tags(text, self.config.show_internal);
        let html = match mode {
            MarkupMode::Line => self.markup.line(&text),
            MarkupMode::Block => self.markup.block(&text),
        };
        trace!(length = html.len(); "Markup rendered");
        let html = self.replace_links(&html, context);
        if self.config.sanitize {
            sanitize_html(&html)
        } else {
            html
        }
    }

    pub fn short_description(&self, element: &Element, mode: MarkupMode) -> String {
        self.doc(element.short_description(), element, mode)
    }

    pub fn long_description(&self, element: &Element) -> String {
        let text = collapse_indented_breaks(element.long_description());
        self.doc(&text, element, MarkupMode::Block)
    }

    /// Links every type of a type-bearing value, joined with `|`.
    pub fn type_links(&self, value: &str, context: &Element) -> String {
        self.render_types(&split_types(value), context)
    }

    /// Links one reference wrapped in `<code>`, or returns the escaped guess.
    pub fn resolve_link(&self, definition: &str, context: &Element) -> String {
        let (name, suffix) = strip_array_suffix(definition.trim());
        match self.resolver.resolve(name, context) {
            Resolution::Resolved(element) => {
                format!("<code>{}{}</code>", self.element_link(element), suffix)
            }
            Resolution::Unresolved { guess } => escape_html(&guess),
        }
    }

    /// Links a code sample that names a single symbol, otherwise hands it to
    /// `highlighter`.
    pub fn highlight_code(
        &self,
        source: &str,
        context: &Element,
        highlighter: &dyn SyntaxHighlighter,
    ) -> String {
        let token = source.trim();
        if !token.is_empty() && !token.contains(char::is_whitespace) {
            let (name, _) = strip_array_suffix(token);
            if self.resolver.resolve(name, context).is_resolved() {
                return self.resolve_link(token, context);
            }
        }
        highlighter.highlight(source)
    }

    pub(crate) fn render_types(&self, list: &TypeList, context: &Element) -> String {
        list.types
            .iter()
            .map(|token| match self.resolver.resolve(&token.name, context) {
                Resolution::Resolved(element) => {
                    format!("{}{}", self.element_link(element), token.suffix())
                }
                Resolution::Unresolved { guess } => escape_html(&guess),
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    pub(crate) fn element_link(&self, element: &Element) -> String {
        self.links.symbol_link(element, &element.style_classes())
    }

    pub(crate) fn is_resolvable(&self, reference: &str, context: &Element) -> bool {
        let (name, _) = strip_array_suffix(reference.trim());
        self.resolver.resolve(name, context).is_resolved()
    }

    pub(crate) fn links(&self) -> &'a dyn LinkRenderer {
        self.links
    }

    fn replace_links(&self, html: &str, context: &Element) -> String {
        replace_link_tags(html, |target, description| {
            let decoded = unescape_html(target);
            if is_absolute_uri(&decoded) {
                // The description is markup output already.
                return self.links.external_link_html(&decoded, description);
            }
            let (name, suffix) = strip_array_suffix(&decoded);
            match self.resolver.resolve(name, context) {
                Resolution::Resolved(element) => {
                    format!("<code>{}{}</code>", self.element_link(element), suffix)
                }
                Resolution::Unresolved { .. } => {
                    debug!(reference = decoded.as_str(); "Link tag left as text");
                    target.to_string()
                }
            }
        })
    }
}

/// Joins indented continuation lines outside `<code>` and `<pre>` spans.
fn collapse_indented_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in PRESERVED_SPANS.find_iter(text) {
        out.push_str(&INDENTED_BREAK.replace_all(&text[last..span.start()], " "));
        out.push_str(span.as_str());
        last = span.end();
    }
    out.push_str(&INDENTED_BREAK.replace_all(&text[last..], " "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indented_breaks_collapse_outside_code() {
        let text = "First line\n    continues\n<pre>keep\n    this</pre>\n\tand <code>a\n  b</code>";
        assert_eq!(
            collapse_indented_breaks(text),
            "First line continues\n<pre>keep\n    this</pre> and <code>a\n  b</code>"
        );
    }

    #[test]
    fn unindented_breaks_are_kept() {
        assert_eq!(collapse_indented_breaks("one\ntwo\n\nthree"), "one\ntwo\n\nthree");
    }
}
