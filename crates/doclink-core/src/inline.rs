//! Scanners for the inline `{@...}` tags of a comment.
//!
//! Two passes run at different pipeline stages: [`strip_internal_tags`] on the
//! raw comment before markup, and [`replace_link_tags`] on the markup output.
//! Both copy anything they do not recognise through unchanged, including
//! unterminated tags.

use crate::types::split_value;

/// Drops `{@internal ...}` tags, or unwraps them when `show_internal` is set.
///
/// Braces inside the tag are balanced with a depth counter so the content may
/// itself contain `{...}` pairs. Other `{@name ...}` tags are copied verbatim
/// as a whole; tags nested inside them are left alone.
pub fn strip_internal_tags(text: &str, show_internal: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{@") {
        out.push_str(&rest[..start]);
        let tag = &rest[start..];
        let name = tag_name(&tag[2..]);
        let body_start = 2 + name.len();
        let close = if name.is_empty() {
            None
        } else {
            closing_brace(&tag[body_start..])
        };

        match close {
            Some(offset) => {
                let body = &tag[body_start..body_start + offset];
                let whole = &tag[..body_start + offset + 1];
                if name == "internal" && (body.is_empty() || body.starts_with(char::is_whitespace))
                {
                    let content = body.trim_start();
                    if show_internal && !content.trim_end().is_empty() {
                        out.push_str(content);
                    }
                } else {
                    out.push_str(whole);
                }
                rest = &tag[whole.len()..];
            }
            None => {
                out.push('{');
                rest = &tag[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Replaces every well-formed `{@link target description}` and
/// `{@see target description}` with the output of `render(target, description)`.
///
/// The tag name must be followed by whitespace and a non-blank body that
/// contains no `}`. The body is split at its first whitespace run; the
/// description may be empty.
pub fn replace_link_tags<F>(text: &str, mut render: F) -> String
where
    F: FnMut(&str, &str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{@") {
        out.push_str(&rest[..start]);
        let tag = &rest[start..];
        match parse_link_tag(tag) {
            Some((len, target, description)) => {
                out.push_str(&render(target, description));
                rest = &tag[len..];
            }
            None => {
                out.push('{');
                rest = &tag[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn parse_link_tag(tag: &str) -> Option<(usize, &str, &str)> {
    let after = tag
        .strip_prefix("{@link")
        .or_else(|| tag.strip_prefix("{@see"))?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let end = after.find('}')?;
    let body = after[..end].trim();
    if body.is_empty() {
        return None;
    }
    let (target, description) = split_value(body);
    let len = tag.len() - after.len() + end + 1;
    Some((len, target, description))
}

fn tag_name(text: &str) -> &str {
    let end = text
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

/// Offset of the `}` closing a tag whose opening brace precedes `text`.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, byte) in text.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(index),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_tag_hidden_or_unwrapped() {
        let text = "Public. {@internal Only for {maintainers}.} Done.";
        assert_eq!(strip_internal_tags(text, false), "Public.  Done.");
        assert_eq!(
            strip_internal_tags(text, true),
            "Public. Only for {maintainers}. Done."
        );
    }

    #[test]
    fn bare_internal_tag_always_collapses() {
        assert_eq!(strip_internal_tags("a{@internal}b", true), "ab");
        assert_eq!(strip_internal_tags("a{@internal   }b", true), "ab");
    }

    #[test]
    fn other_tags_are_copied_whole() {
        let text = "See {@link Foo {@internal x}} here";
        assert_eq!(strip_internal_tags(text, false), text);
        assert_eq!(strip_internal_tags("{@internalish x}", false), "{@internalish x}");
    }

    #[test]
    fn unterminated_tags_pass_through() {
        assert_eq!(
            strip_internal_tags("open {@internal {never closed}", false),
            "open {@internal {never closed}"
        );
        assert_eq!(strip_internal_tags("{@ x} {@", false), "{@ x} {@");
    }

    #[test]
    fn link_tags_are_split_into_target_and_description() {
        let out = replace_link_tags("A {@link Foo the foo} and {@see Bar}.", |target, desc| {
            format!("[{}|{}]", target, desc)
        });
        assert_eq!(out, "A [Foo|the foo] and [Bar|].");
    }

    #[test]
    fn malformed_link_tags_are_literal() {
        let render = |_: &str, _: &str| String::from("X");
        assert_eq!(replace_link_tags("{@link }", render), "{@link }");
        assert_eq!(replace_link_tags("{@linkFoo}", render), "{@linkFoo}");
        assert_eq!(replace_link_tags("{@link Foo", render), "{@link Foo");
        assert_eq!(replace_link_tags("{@internal x}", render), "{@internal x}");
    }
}
