use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n([ \t\r]*)\n").expect("valid blank line pattern"));

/// Converts comment markup to HTML.
pub trait MarkupEngine: Sync {
    /// Renders paragraphs, lists and other block structure.
    fn block(&self, text: &str) -> String;

    /// Renders inline markup only, without a wrapping paragraph.
    fn line(&self, text: &str) -> String;
}

/// CommonMark engine backed by pulldown-cmark.
#[derive(Clone, Copy, Debug)]
pub struct CommonMark {
    options: Options,
}

impl Default for CommonMark {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl CommonMark {
    pub fn new() -> Self {
        Self::default()
    }

    fn opens_html_block(&self, text: &str) -> bool {
        matches!(
            Parser::new_ext(text, self.options).next(),
            Some(Event::Start(Tag::HtmlBlock))
        )
    }
}

impl MarkupEngine for CommonMark {
    fn block(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(text, self.options));
        // Blank lines only come from code blocks; a newline reference keeps
        // the output one HTML block when it is parsed again.
        BLANK_LINE
            .replace_all(out.trim(), "\n${1}&#10;")
            .into_owned()
    }

    fn line(&self, text: &str) -> String {
        // Everything ends up on one line. Text is entity-encoded wherever
        // CommonMark would read it as markup, so the output parses back to
        // the same HTML.
        let events = Parser::new_ext(text, self.options).filter_map(|event| match event {
            Event::Start(tag) if is_inline_tag(&tag) => Some(Event::Start(tag)),
            Event::Start(_) => None,
            Event::End(tag) if is_inline_end(tag) => Some(Event::End(tag)),
            Event::End(_) | Event::SoftBreak => Some(Event::InlineHtml(" ".into())),
            Event::HardBreak => Some(Event::InlineHtml("<br />".into())),
            Event::Rule | Event::TaskListMarker(_) => None,
            Event::Text(content) | Event::Html(content) => {
                Some(Event::InlineHtml(encode_inline(&content).into()))
            }
            Event::Code(code) => Some(Event::InlineHtml(
                format!("<code>{}</code>", encode_inline(&code)).into(),
            )),
            Event::InlineHtml(tag) => {
                Some(Event::InlineHtml(tag.replace(['\r', '\n'], " ").into()))
            }
            other => Some(other),
        });
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        let out = protect_line_start(out.trim());
        // A leading tag that now opens an HTML block is escaped like one.
        if out.starts_with('<') && self.opens_html_block(&out) {
            return self.line(&out);
        }
        out
    }
}

/// Escapes HTML and encodes inline markup punctuation as numeric references.
fn encode_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\r' | '\n' => out.push(' '),
            '\\' | '`' | '*' | '_' | '[' | ']' | '~' => push_reference(&mut out, ch),
            _ => out.push(ch),
        }
    }
    out
}

/// Encodes a leading heading, list or ordered list marker.
fn protect_line_start(html: &str) -> String {
    let bytes = html.as_bytes();
    let digits = bytes.iter().take_while(|byte| byte.is_ascii_digit()).count();
    let marker = match bytes.first().copied() {
        Some(b'#' | b'-' | b'+') => Some(0),
        Some(b'0'..=b'9') => match (bytes.get(digits).copied(), bytes.get(digits + 1).copied()) {
            (Some(b'.' | b')'), None | Some(b' ' | b'\t')) => Some(digits),
            _ => None,
        },
        _ => None,
    };
    match marker {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + 4);
            out.push_str(&html[..at]);
            push_reference(&mut out, char::from(bytes[at]));
            out.push_str(&html[at + 1..]);
            out
        }
        None => html.to_string(),
    }
}

fn push_reference(out: &mut String, ch: char) {
    out.push_str(&format!("&#{};", u32::from(ch)));
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}
