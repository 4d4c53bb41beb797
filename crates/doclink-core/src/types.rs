//! Splitting of type-bearing annotation values such as
//! `string|Foo[] $name The name`.

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeToken {
    pub name: String,
    /// The token ended in `[]`; the suffix is only shown again next to a
    /// resolved link.
    pub array: bool,
}

impl TypeToken {
    fn parse(token: &str) -> Self {
        let (name, suffix) = strip_array_suffix(token);
        Self {
            name: name.to_string(),
            array: !suffix.is_empty(),
        }
    }

    pub fn suffix(&self) -> &'static str {
        if self.array { "[]" } else { "" }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeList {
    pub types: Vec<TypeToken>,
    /// Parameter name of a parameter-shaped value, e.g. `$name`.
    pub parameter: Option<String>,
    pub description: String,
}

/// Splits a value at its first whitespace run into the leading token and the
/// trimmed remainder.
pub fn split_value(value: &str) -> (&str, &str) {
    let value = value.trim_start();
    match value.find(char::is_whitespace) {
        Some(pos) => (&value[..pos], value[pos..].trim()),
        None => (value, ""),
    }
}

/// Splits a trailing `[]` off a reference, returning the name and the suffix.
pub fn strip_array_suffix(reference: &str) -> (&str, &str) {
    match reference.strip_suffix("[]") {
        Some(name) => (name, "[]"),
        None => (reference, ""),
    }
}

pub fn split_types(value: &str) -> TypeList {
    let (mut expression, mut remainder) = split_value(value);
    let mut parameter = None;

    if is_parameter_name(expression) {
        parameter = Some(expression.to_string());
        expression = "";
    } else {
        let (next, rest) = split_value(remainder);
        if is_parameter_name(next) {
            parameter = Some(next.to_string());
            remainder = rest;
        }
    }

    if expression.is_empty() {
        expression = "mixed";
    }

    let types = expression
        .split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(TypeToken::parse)
        .collect();

    TypeList {
        types,
        parameter,
        description: remainder.to_string(),
    }
}

fn is_parameter_name(token: &str) -> bool {
    let token = token.strip_prefix('&').unwrap_or(token);
    let token = token.strip_prefix("...").unwrap_or(token);
    token.len() > 1 && token.starts_with('$')
}
