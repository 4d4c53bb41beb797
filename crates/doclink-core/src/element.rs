use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ElementKind {
    Class,
    Method,
    Property,
    Function,
    Constant,
}

/// A documented symbol as the symbol table knows it.
///
/// Top-level elements (classes, functions, global constants) carry their
/// fully qualified name. Members carry their own name plus the fully
/// qualified name of the declaring class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub namespace: String,
    pub declaring_class: Option<String>,
    pub deprecated: bool,
    pub valid: bool,
    pub short_description: String,
    pub long_description: String,
    /// `use` imports in effect where the element is declared, keyed by alias.
    pub aliases: BTreeMap<String, String>,
}

impl Element {
    fn top_level(kind: ElementKind, name: &str) -> Self {
        let name = name.trim_start_matches('\\');
        Self {
            kind,
            name: name.to_string(),
            namespace: namespace_of(name).to_string(),
            declaring_class: None,
            deprecated: false,
            valid: true,
            short_description: String::new(),
            long_description: String::new(),
            aliases: BTreeMap::new(),
        }
    }

    fn member(kind: ElementKind, class: &str, name: &str) -> Self {
        let class = class.trim_start_matches('\\');
        Self {
            kind,
            name: name.to_string(),
            namespace: namespace_of(class).to_string(),
            declaring_class: Some(class.to_string()),
            deprecated: false,
            valid: true,
            short_description: String::new(),
            long_description: String::new(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::top_level(ElementKind::Class, name)
    }

    pub fn function(name: &str) -> Self {
        Self::top_level(ElementKind::Function, name)
    }

    pub fn constant(name: &str) -> Self {
        Self::top_level(ElementKind::Constant, name)
    }

    pub fn method(class: &str, name: &str) -> Self {
        Self::member(ElementKind::Method, class, name)
    }

    pub fn property(class: &str, name: &str) -> Self {
        Self::member(ElementKind::Property, class, name.trim_start_matches('$'))
    }

    pub fn class_constant(class: &str, name: &str) -> Self {
        Self::member(ElementKind::Constant, class, name)
    }

    /// A context standing for the global namespace. It is not class-shaped
    /// and owns no members, so only top-level names resolve against it.
    pub fn global() -> Self {
        Self::top_level(ElementKind::Function, "")
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: &str) -> Self {
        self.aliases
            .insert(alias.into(), target.trim_start_matches('\\').to_string());
        self
    }

    pub fn with_descriptions(
        mut self,
        short: impl Into<String>,
        long: impl Into<String>,
    ) -> Self {
        self.short_description = short.into();
        self.long_description = long.into();
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn is_class_shaped(&self) -> bool {
        self.kind == ElementKind::Class
    }

    /// Style classes a link to this element carries.
    pub fn style_classes(&self) -> Vec<StyleClass> {
        let mut classes = Vec::new();
        if self.deprecated {
            classes.push(StyleClass::Deprecated);
        }
        if !self.valid {
            classes.push(StyleClass::Invalid);
        }
        classes
    }

    /// Human-readable path used as link text and for context lookup.
    pub fn display_name(&self) -> String {
        match (&self.declaring_class, self.kind) {
            (Some(class), ElementKind::Method) => format!("{}::{}()", class, self.name),
            (Some(class), ElementKind::Property) => format!("{}::${}", class, self.name),
            (Some(class), _) => format!("{}::{}", class, self.name),
            (None, ElementKind::Function) => format!("{}()", self.name),
            (None, _) => self.name.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StyleClass {
    Deprecated,
    Invalid,
}

impl StyleClass {
    pub fn css_class(self) -> &'static str {
        match self {
            StyleClass::Deprecated => "deprecated",
            StyleClass::Invalid => "invalid",
        }
    }
}

pub(crate) fn namespace_of(name: &str) -> &str {
    match name.rfind('\\') {
        Some(pos) => &name[..pos],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_take_the_namespace_of_their_class() {
        let method = Element::method("\\App\\Model\\User", "save");
        assert_eq!(method.namespace, "App\\Model");
        assert_eq!(method.declaring_class.as_deref(), Some("App\\Model\\User"));
        assert_eq!(method.display_name(), "App\\Model\\User::save()");
    }

    #[test]
    fn style_classes_follow_flags() {
        let element = Element::class("Legacy").deprecated(true).valid(false);
        assert_eq!(
            element.style_classes(),
            vec![StyleClass::Deprecated, StyleClass::Invalid]
        );
        assert!(Element::class("Fresh").style_classes().is_empty());
    }

    #[test]
    fn display_names_by_kind() {
        assert_eq!(Element::function("App\\helper").display_name(), "App\\helper()");
        assert_eq!(Element::property("User", "$email").display_name(), "User::$email");
        assert_eq!(Element::class_constant("User", "MAX").display_name(), "User::MAX");
        assert_eq!(Element::constant("App\\VERSION").display_name(), "App\\VERSION");
    }
}
