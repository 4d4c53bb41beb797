mod annotation;
mod config;
mod element;
mod escape;
mod highlight;
mod inline;
mod link;
mod markup;
mod render;
mod resolver;
mod sanitize;
mod symbols;
mod types;

pub use annotation::AnnotationKind;
pub use config::RenderConfig;
pub use element::{Element, ElementKind, StyleClass};
pub use escape::{escape_attr, escape_html, unescape_html};
pub use highlight::{PlainHighlighter, SyntaxHighlighter};
pub use inline::{replace_link_tags, strip_internal_tags};
pub use link::{HtmlLinks, LinkRenderer, is_absolute_uri};
pub use markup::{CommonMark, MarkupEngine};
pub use render::{DocRenderer, MarkupMode};
pub use resolver::{Resolution, SymbolResolver};
pub use sanitize::sanitize_html;
pub use symbols::{ClassEntry, SymbolTable, SymbolTableError};
pub use types::{TypeList, TypeToken, split_types, split_value, strip_array_suffix};
