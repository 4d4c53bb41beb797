use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::Element;
use crate::escape::escape_html;
use crate::link::is_absolute_uri;
use crate::render::{DocRenderer, MarkupMode};
use crate::types::{split_types, split_value};

static SEE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid see separator pattern"));

/// Annotations with dedicated formatting. Everything else is [`AnnotationKind::Other`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnnotationKind {
    Return,
    Throws,
    License,
    Link,
    See,
    Uses,
    UsedBy,
    Other,
}

impl AnnotationKind {
    /// Maps an annotation name, with or without its leading `@`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().trim_start_matches('@') {
            "return" => AnnotationKind::Return,
            "throws" => AnnotationKind::Throws,
            "license" => AnnotationKind::License,
            "link" => AnnotationKind::Link,
            "see" => AnnotationKind::See,
            "uses" => AnnotationKind::Uses,
            "usedby" => AnnotationKind::UsedBy,
            _ => AnnotationKind::Other,
        }
    }
}

impl DocRenderer<'_> {
    /// Renders the value of one annotation attached to `context`.
    pub fn annotation(&self, name: &str, value: &str, context: &Element) -> String {
        match AnnotationKind::from_name(name) {
            AnnotationKind::Return | AnnotationKind::Throws => {
                let list = split_types(value);
                let types = self.render_types(&list, context);
                if list.description.is_empty() {
                    types
                } else {
                    format!(
                        "{}<br>{}",
                        types,
                        self.doc(&list.description, context, MarkupMode::Line)
                    )
                }
            }
            AnnotationKind::License => {
                let (url, description) = split_value(value);
                self.links().external_link(url, description)
            }
            AnnotationKind::Link => {
                let (url, description) = split_value(value);
                if is_absolute_uri(url) {
                    self.links().external_link(url, description)
                } else {
                    debug!(value = value; "Link annotation without an absolute URI");
                    String::new()
                }
            }
            // Empty items keep their slot in the list.
            AnnotationKind::See => SEE_SEPARATOR
                .split(value.trim())
                .map(|item| {
                    if self.is_resolvable(item, context) {
                        self.type_links(item, context)
                    } else {
                        self.doc(item, context, MarkupMode::Line)
                    }
                })
                .collect::<Vec<_>>()
                .join(", "),
            AnnotationKind::Uses | AnnotationKind::UsedBy => {
                let (target, description) = split_value(value);
                if !self.is_resolvable(target, context) {
                    debug!(target_name = target; "Usage annotation target unresolved");
                    return String::new();
                }
                let separator = if context.is_class_shaped() || description.is_empty() {
                    " "
                } else {
                    "<br>"
                };
                format!(
                    "{}{}{}",
                    self.type_links(target, context),
                    separator,
                    escape_html(description)
                )
                .trim()
                .to_string()
            }
            AnnotationKind::Other => self.doc(value, context, MarkupMode::Line),
        }
    }
}
