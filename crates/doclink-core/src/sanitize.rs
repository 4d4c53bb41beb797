use ammonia::Builder;
use std::collections::{HashMap, HashSet};

/// Cleans rendered comment HTML against a safe allow-list.
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a",
        "abbr",
        "b",
        "blockquote",
        "br",
        "code",
        "dd",
        "del",
        "div",
        "dl",
        "dt",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "kbd",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "span",
        "strong",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
    ]
    .iter()
    .copied()
    .collect();

    let mut generic_attributes: HashSet<&'static str> = HashSet::new();
    generic_attributes.insert("class");
    generic_attributes.insert("id");

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "title"].iter().copied().collect());
    tag_attributes.insert("abbr", ["title"].iter().copied().collect());
    tag_attributes.insert("img", ["alt", "src", "title"].iter().copied().collect());
    tag_attributes.insert("ol", ["start"].iter().copied().collect());
    // syntect emits inline colours
    tag_attributes.insert("span", ["style"].iter().copied().collect());

    Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .link_rel(None)
        .url_relative(ammonia::UrlRelative::PassThrough)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize_html;

    #[test]
    fn keeps_links_and_style_classes() {
        let html = "<a href=\"class-Foo.html\" class=\"deprecated\">Foo</a>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn drops_scripts_and_handlers() {
        let html = "<p onclick=\"x()\">Hi<script>alert(1)</script></p>";
        assert_eq!(sanitize_html(html), "<p>Hi</p>");
    }

    #[test]
    fn drops_javascript_urls() {
        let cleaned = sanitize_html("<a href=\"javascript:alert(1)\">x</a>");
        assert!(!cleaned.contains("javascript:"));
        assert!(cleaned.contains(">x</a>"));
    }
}
