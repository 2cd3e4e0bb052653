//! Compound selectors.
//!
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
//!
//! The host only needs to find elements by a configured marker, so the
//! grammar is a selector list of compound selectors:
//!
//! ```text
//! selector-list     = compound ( "," compound )*
//! compound          = [ type | "*" ] ( "." class | "#" id )*
//! ```
//!
//! Combinators, attribute selectors and pseudo-classes are rejected with a
//! [`SelectorError`] rather than silently matching nothing.

use std::fmt;

use clamp_dom::{DomTree, ElementData, NodeId};
use thiserror::Error;

/// Why a selector string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector (or one member of a list) was empty.
    #[error("empty selector")]
    Empty,
    /// A character the supported grammar does not cover.
    #[error("unsupported character {found:?} at offset {offset} in selector {selector:?}")]
    Unsupported {
        /// The full selector text.
        selector: String,
        /// The offending character.
        found: char,
        /// Byte offset of `found` within its member of the selector list.
        offset: usize,
    },
    /// A `.` or `#` with no name after it.
    #[error("missing name after {sigil:?} in selector {selector:?}")]
    MissingName {
        /// The full selector text.
        selector: String,
        /// `.` or `#`.
        sigil: char,
    },
}

/// [§ 5.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Lowercased type selector; `None` for `*` or when omitted.
    pub tag: Option<String>,
    /// Required id.
    pub id: Option<String>,
    /// Required classes, all of which must be present.
    pub classes: Vec<String>,
}

impl CompoundSelector {
    /// Whether `element` satisfies every simple selector in this compound.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        self.tag.as_deref().is_none_or(|t| element.tag_name == t)
            && self.id.as_deref().is_none_or(|id| element.id() == Some(id))
            && self.classes.iter().all(|c| element.has_class(c))
    }

    /// [§ 17 Calculating a selector's specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// `(ids, classes, types)`.
    #[must_use]
    pub fn specificity(&self) -> (usize, usize, usize) {
        (
            usize::from(self.id.is_some()),
            self.classes.len(),
            usize::from(self.tag.is_some()),
        )
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}")?,
            None if self.id.is_none() && self.classes.is_empty() => write!(f, "*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list such as `.a-heading` or `h1.title, h2.title`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] for empty input or syntax outside the
    /// supported grammar.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in input.split(',') {
            alternatives.push(parse_compound(part.trim(), input)?);
        }
        Ok(Self { alternatives })
    }

    /// The compound selectors of this list.
    #[must_use]
    pub fn alternatives(&self) -> &[CompoundSelector] {
        &self.alternatives
    }

    /// Whether `element` matches any member of the list.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }

    /// Highest specificity among the members that match `element`.
    #[must_use]
    pub fn matching_specificity(&self, element: &ElementData) -> Option<(usize, usize, usize)> {
        self.alternatives
            .iter()
            .filter(|c| c.matches(element))
            .map(CompoundSelector::specificity)
            .max()
    }

    /// [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
    ///
    /// "Returns all element descendants of node that match selectors", in
    /// tree order.
    #[must_use]
    pub fn query_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.descendants(scope)
            .filter(|&id| tree.as_element(id).is_some_and(|e| self.matches(e)))
            .collect()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// [§ 4.2 Identifiers](https://www.w3.org/TR/css-syntax-3/#ident-token-diagram)
///
/// Name characters, minus escapes and the leading-digit rule.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn parse_compound(text: &str, whole: &str) -> Result<CompoundSelector, SelectorError> {
    if text.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compound = CompoundSelector::default();
    let mut chars = text.char_indices().peekable();

    // STEP 1: Optional type selector or universal selector.
    if text.starts_with('*') {
        let _ = chars.next();
    } else {
        let end = text.find(|c: char| !is_name_char(c)).unwrap_or(text.len());
        if end > 0 {
            compound.tag = Some(text[..end].to_ascii_lowercase());
            while chars.peek().is_some_and(|&(i, _)| i < end) {
                let _ = chars.next();
            }
        }
    }

    // STEP 2: Any number of `.class` / `#id` simple selectors.
    while let Some((offset, sigil)) = chars.next() {
        if sigil != '.' && sigil != '#' {
            return Err(SelectorError::Unsupported {
                selector: whole.to_owned(),
                found: sigil,
                offset,
            });
        }
        let mut name = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            let _ = chars.next();
        }
        if name.is_empty() {
            return Err(SelectorError::MissingName {
                selector: whole.to_owned(),
                sigil,
            });
        }
        if sigil == '.' {
            compound.classes.push(name);
        } else {
            compound.id = Some(name);
        }
    }

    Ok(compound)
}
