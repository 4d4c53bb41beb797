use crate::element::Element;

/// Outcome of resolving one textual reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution<'a> {
    Resolved(&'a Element),
    /// The reference matched nothing. `guess` is the name to show instead,
    /// never the raw input (aliases expanded, leading `\` stripped).
    Unresolved { guess: String },
}

impl<'a> Resolution<'a> {
    pub fn unresolved(guess: impl Into<String>) -> Self {
        Resolution::Unresolved {
            guess: guess.into(),
        }
    }

    pub fn element(&self) -> Option<&'a Element> {
        match self {
            Resolution::Resolved(element) => Some(element),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Maps references found in comments onto known symbols.
///
/// Implementations must be pure over a read-only table: the same
/// `(reference, context)` always yields the same answer and nothing is
/// mutated while resolving.
pub trait SymbolResolver: Sync {
    fn resolve<'a>(&'a self, reference: &str, context: &Element) -> Resolution<'a>;
}
