use url::Url;

use crate::element::{Element, ElementKind, StyleClass};
use crate::escape::{escape_attr, escape_html};

/// Turns resolved elements and external URLs into anchors.
pub trait LinkRenderer: Sync {
    fn symbol_link(&self, element: &Element, classes: &[StyleClass]) -> String;

    /// Links `url` with an already rendered label. An empty label falls
    /// back to the URL itself.
    fn external_link_html(&self, url: &str, label_html: &str) -> String;

    /// Same as [`LinkRenderer::external_link_html`] for a plain text label.
    fn external_link(&self, url: &str, label: &str) -> String {
        self.external_link_html(url, &escape_html(label))
    }
}

/// Default link renderer producing one page per top-level element.
#[derive(Clone, Debug, Default)]
pub struct HtmlLinks {
    base_url: String,
}

impl HtmlLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix put in front of every page name, e.g. `/api/`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn href(&self, element: &Element) -> String {
        let page = match (&element.declaring_class, element.kind) {
            (Some(class), ElementKind::Method) => {
                format!("{}#_{}", page_name("class", class), element.name)
            }
            (Some(class), ElementKind::Property) => {
                format!("{}#${}", page_name("class", class), element.name)
            }
            (Some(class), _) => format!("{}#{}", page_name("class", class), element.name),
            (None, ElementKind::Function) => page_name("function", &element.name),
            (None, ElementKind::Constant) => page_name("constant", &element.name),
            (None, _) => page_name("class", &element.name),
        };
        format!("{}{}", self.base_url, page)
    }
}

impl LinkRenderer for HtmlLinks {
    fn symbol_link(&self, element: &Element, classes: &[StyleClass]) -> String {
        let mut out = format!("<a href=\"{}\"", escape_attr(&self.href(element)));
        if !classes.is_empty() {
            let names: Vec<&str> = classes.iter().map(|class| class.css_class()).collect();
            out.push_str(&format!(" class=\"{}\"", names.join(" ")));
        }
        out.push('>');
        out.push_str(&escape_html(&element.display_name()));
        out.push_str("</a>");
        out
    }

    fn external_link_html(&self, url: &str, label_html: &str) -> String {
        let label = if label_html.is_empty() {
            escape_html(url)
        } else {
            label_html.to_string()
        };
        format!("<a href=\"{}\">{}</a>", escape_attr(url), label)
    }
}

fn page_name(prefix: &str, name: &str) -> String {
    format!("{}-{}.html", prefix, urlize(name))
}

fn urlize(name: &str) -> String {
    name.trim_start_matches('\\')
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '.'
            }
        })
        .collect()
}

/// Whether `text` is an absolute URI that can be linked to as is. Only web
/// schemes with an authority and a few opaque schemes qualify.
pub fn is_absolute_uri(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "ftp" => url.has_host(),
            "mailto" | "urn" | "tel" | "data" => true,
            _ => false,
        },
        Err(_) => false,
    }
}
