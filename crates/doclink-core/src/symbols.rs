//! In-memory symbol table and the default [`SymbolResolver`].
//!
//! Classes and functions are keyed case-insensitively, constants and
//! properties case-sensitively, methods case-insensitively.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use log::{debug, trace, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::element::{Element, ElementKind};
use crate::resolver::{Resolution, SymbolResolver};

/// Names that are types of the language itself and never link anywhere.
const SIMPLE_TYPES: &[&str] = &[
    "boolean", "bool", "integer", "int", "float", "double", "string", "array", "object",
    "resource", "callback", "callable", "iterable", "null", "false", "true", "mixed", "void",
    "never",
];

#[derive(Debug, Error)]
pub enum SymbolTableError {
    #[error("failed to parse symbol table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class {0} is declared more than once")]
    DuplicateClass(String),
}

#[derive(Clone, Debug)]
pub struct ClassEntry {
    pub element: Element,
    pub parent: Option<String>,
    methods: HashMap<String, Element>,
    properties: HashMap<String, Element>,
    constants: HashMap<String, Element>,
}

impl ClassEntry {
    fn new(element: Element, parent: Option<&str>) -> Self {
        Self {
            element,
            parent: parent.map(|name| name.to_string()),
            methods: HashMap::new(),
            properties: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// Registers a method, property or class constant. Members declared
    /// without imports inherit the imports of their class.
    pub fn add_member(&mut self, mut member: Element) -> &mut Self {
        if member.aliases.is_empty() {
            member.aliases = self.element.aliases.clone();
        }
        match member.kind {
            ElementKind::Method => {
                self.methods.insert(fold_case(&member.name), member);
            }
            ElementKind::Property => {
                self.properties.insert(member.name.clone(), member);
            }
            ElementKind::Constant => {
                self.constants.insert(member.name.clone(), member);
            }
            ElementKind::Class | ElementKind::Function => {
                warn!(
                    class = self.element.name.as_str(),
                    member = member.name.as_str();
                    "Ignoring member that is not a method, property or constant"
                );
            }
        }
        self
    }

    fn own_member(&self, member: &str) -> Option<&Element> {
        if let Some(found) = self.properties.get(member) {
            return Some(found);
        }
        if let Some(found) = member
            .strip_prefix('$')
            .and_then(|name| self.properties.get(name))
        {
            return Some(found);
        }
        if let Some(found) = self.methods.get(&fold_case(member)) {
            return Some(found);
        }
        if let Some(found) = member
            .strip_suffix("()")
            .and_then(|name| self.methods.get(&fold_case(name)))
        {
            return Some(found);
        }
        self.constants.get(member)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    classes: HashMap<String, ClassEntry>,
    functions: HashMap<String, Element>,
    constants: HashMap<String, Element>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, element: Element, parent: Option<&str>) -> &mut ClassEntry {
        let entry = ClassEntry::new(element, parent.map(|name| name.trim_start_matches('\\')));
        match self.classes.entry(fold_case(&entry.element.name)) {
            Entry::Occupied(mut slot) => {
                slot.insert(entry);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(entry),
        }
    }

    pub fn add_function(&mut self, element: Element) {
        self.functions.insert(fold_case(&element.name), element);
    }

    pub fn add_constant(&mut self, element: Element) {
        self.constants.insert(element.name.clone(), element);
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.functions.len() + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks a class up by its fully qualified name.
    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(&fold_case(name.trim_start_matches('\\')))
    }

    /// Finds an element by the path [`Element::display_name`] produces:
    /// `Class`, `Class::method()`, `Class::$property`, `Class::CONSTANT`,
    /// `function()` or `CONSTANT`.
    pub fn element(&self, path: &str) -> Option<&Element> {
        let path = path.trim().trim_start_matches('\\');
        if let Some((class, member)) = path.split_once("::") {
            return self.class(class)?.own_member(member);
        }
        if let Some(name) = path.strip_suffix("()") {
            return self.functions.get(&fold_case(name));
        }
        self.class(path)
            .map(|entry| &entry.element)
            .or_else(|| self.constants.get(path))
            .or_else(|| self.functions.get(&fold_case(path)))
    }

    pub fn from_json(source: &str) -> Result<Self, SymbolTableError> {
        let source: TableSource = serde_json::from_str(source)?;
        let mut table = SymbolTable::new();

        for class in source.classes {
            let name = class.element.name.trim_start_matches('\\').to_string();
            if table.class(&name).is_some() {
                return Err(SymbolTableError::DuplicateClass(name));
            }
            let entry = table.add_class(
                class.element.into_element(Element::class(&name)),
                class.parent.as_deref(),
            );
            for method in class.methods {
                let element = Element::method(&name, &method.name);
                entry.add_member(method.into_element(element));
            }
            for property in class.properties {
                let element = Element::property(&name, &property.name);
                entry.add_member(property.into_element(element));
            }
            for constant in class.constants {
                let element = Element::class_constant(&name, &constant.name);
                entry.add_member(constant.into_element(element));
            }
        }
        for function in source.functions {
            let element = Element::function(&function.name);
            table.add_function(function.into_element(element));
        }
        for constant in source.constants {
            let element = Element::constant(&constant.name);
            table.add_constant(constant.into_element(element));
        }

        debug!(symbols = table.len(); "Loaded symbol table");
        Ok(table)
    }

    fn lookup_class(&self, name: &str, namespace: &str) -> Option<&ClassEntry> {
        scoped(&self.classes, name, namespace, fold_case)
    }

    fn lookup_top_level(&self, name: &str, namespace: &str) -> Option<&Element> {
        if let Some(class) = self.lookup_class(name, namespace) {
            return Some(&class.element);
        }
        if let Some(constant) = scoped(&self.constants, name, namespace, |key| key.to_string()) {
            return Some(constant);
        }
        scoped(&self.functions, name, namespace, fold_case).or_else(|| {
            name.strip_suffix("()")
                .and_then(|bare| scoped(&self.functions, bare, namespace, fold_case))
        })
    }

    fn class_scope(&self, context: &Element) -> Option<&ClassEntry> {
        match (&context.declaring_class, context.kind) {
            (Some(class), _) => self.class(class),
            (None, ElementKind::Class) => self.class(&context.name),
            (None, _) => None,
        }
    }

    fn parent_of(&self, entry: &ClassEntry) -> Option<&ClassEntry> {
        let parent = entry.parent.as_deref()?;
        self.lookup_class(parent, &entry.element.namespace)
    }

    /// Searches the class and then its ancestors.
    fn find_member<'a>(&'a self, class: &'a ClassEntry, member: &str) -> Option<&'a Element> {
        let mut current = Some(class);
        let mut hops = 0;
        while let Some(entry) = current {
            if let Some(found) = entry.own_member(member) {
                return Some(found);
            }
            hops += 1;
            if hops > self.classes.len() {
                break;
            }
            current = self.parent_of(entry);
        }
        None
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve<'a>(&'a self, reference: &str, context: &Element) -> Resolution<'a> {
        let trimmed = reference.trim();
        let mut guess = trimmed.trim_start_matches('\\').to_string();
        if trimmed.is_empty() || is_simple_type(trimmed) {
            return Resolution::unresolved(guess);
        }

        let scope = self.class_scope(context);
        if trimmed == "self" || trimmed == "$this" {
            return match scope {
                Some(class) => Resolution::Resolved(&class.element),
                None => Resolution::unresolved(guess),
            };
        }

        let namespace = context.namespace.as_str();
        let mut definition = Cow::Borrowed(trimmed);
        if let Some(expanded) = expand_alias(trimmed, &context.aliases) {
            trace!(reference = trimmed, expanded = expanded.as_str(); "Expanded imported alias");
            guess = expanded.clone();
            if !expanded.contains(':') {
                return match self.class(&expanded) {
                    Some(class) => Resolution::Resolved(&class.element),
                    None => Resolution::unresolved(guess),
                };
            }
            definition = Cow::Owned(expanded);
        } else if let Some(found) = self.lookup_top_level(trimmed, namespace) {
            return Resolution::Resolved(found);
        }

        let (owner, member) = match split_member(&definition) {
            Some((prefix, member)) => {
                let owner = match prefix {
                    "parent" => scope.and_then(|class| self.parent_of(class)),
                    "self" | "static" => scope,
                    other => self.lookup_class(other, namespace).or_else(|| {
                        expand_alias(other, &context.aliases).and_then(|name| self.class(&name))
                    }),
                };
                (owner, member)
            }
            None => (scope, definition.as_ref()),
        };

        match owner.and_then(|class| self.find_member(class, member)) {
            Some(found) => Resolution::Resolved(found),
            None => {
                debug!(
                    reference = trimmed,
                    context = context.display_name();
                    "Reference left unresolved"
                );
                Resolution::unresolved(guess)
            }
        }
    }
}

fn fold_case(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn is_simple_type(name: &str) -> bool {
    SIMPLE_TYPES
        .iter()
        .any(|simple| simple.eq_ignore_ascii_case(name))
}

/// Looks `name` up inside `namespace` first, then globally. A leading `\`
/// marks the name as fully qualified.
fn scoped<'t, T>(
    map: &'t HashMap<String, T>,
    name: &str,
    namespace: &str,
    key: impl Fn(&str) -> String,
) -> Option<&'t T> {
    if let Some(qualified) = name.strip_prefix('\\') {
        return map.get(&key(qualified));
    }
    if !namespace.is_empty() {
        if let Some(found) = map.get(&key(&format!("{}\\{}", namespace, name))) {
            return Some(found);
        }
    }
    map.get(&key(name))
}

fn expand_alias(definition: &str, aliases: &BTreeMap<String, String>) -> Option<String> {
    let base_len = definition
        .find(|ch: char| ch == '\\' || ch == ':')
        .unwrap_or(definition.len());
    if base_len == 0 {
        return None;
    }
    let (base, rest) = definition.split_at(base_len);
    let target = aliases
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(base))
        .map(|(_, target)| target)?;
    let expanded = format!("{}{}", target, rest);
    (expanded != definition).then_some(expanded)
}

fn split_member(definition: &str) -> Option<(&str, &str)> {
    let pos = definition
        .find("::")
        .or_else(|| definition.find("->"))
        .filter(|&pos| pos > 0)?;
    Some((&definition[..pos], &definition[pos + 2..]))
}

#[derive(Deserialize)]
struct TableSource {
    #[serde(default)]
    classes: Vec<ClassSource>,
    #[serde(default)]
    functions: Vec<ElementSource>,
    #[serde(default)]
    constants: Vec<ElementSource>,
}

#[derive(Deserialize)]
struct ClassSource {
    #[serde(flatten)]
    element: ElementSource,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    methods: Vec<ElementSource>,
    #[serde(default)]
    properties: Vec<ElementSource>,
    #[serde(default)]
    constants: Vec<ElementSource>,
}

#[derive(Deserialize)]
struct ElementSource {
    name: String,
    #[serde(default)]
    deprecated: bool,
    #[serde(default = "default_valid")]
    valid: bool,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    long_description: String,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

impl ElementSource {
    fn into_element(self, mut element: Element) -> Element {
        element.deprecated = self.deprecated;
        element.valid = self.valid;
        element.short_description = self.short_description;
        element.long_description = self.long_description;
        for (alias, target) in self.aliases {
            element = element.with_alias(alias, &target);
        }
        element
    }
}

fn default_valid() -> bool {
    true
}
