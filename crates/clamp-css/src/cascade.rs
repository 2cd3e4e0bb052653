//! Stylesheets and the cascade.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! A deliberately small cascade: origin (user agent, then author), then
//! specificity, then order of appearance, then the inline `style`
//! attribute. Inheritance follows [`ComputedStyle::inherit_from`].

use clamp_dom::{DomTree, NodeId};

use crate::selector::{Selector, SelectorError};
use crate::style::{ComputedStyle, Declaration, parse_declarations, strip_comments};
use crate::ua_stylesheet::ua_stylesheet;

/// [§ 6.1 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// The origins the host distinguishes, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    /// The built-in [`ua_stylesheet`].
    UserAgent,
    /// Page-supplied rules.
    Author,
}

/// A qualified rule: selector list plus declaration block.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// Which elements the rule applies to.
    pub selector: Selector,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Cascade origin.
    pub origin: Origin,
}

/// An ordered list of style rules.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    /// Rules in order of appearance.
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Parse `selector { declarations }` rules.
    ///
    /// At-rules and nesting are not supported; text after the last closing
    /// brace is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectorError`] encountered in a rule prelude.
    pub fn parse(css: &str, origin: Origin) -> Result<Self, SelectorError> {
        let css = strip_comments(css);
        let mut rules = Vec::new();
        let mut rest = css.as_str();
        while let Some(open) = rest.find('{') {
            let prelude = rest[..open].trim();
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            let block = &rest[open + 1..open + close];
            rules.push(StyleRule {
                selector: Selector::parse(prelude)?,
                declarations: parse_declarations(block),
                origin,
            });
            rest = &rest[open + close + 1..];
        }
        Ok(Self { rules })
    }

    /// Append another sheet's rules after this one's.
    pub fn append(&mut self, other: Self) {
        self.rules.extend(other.rules);
    }
}

/// Compute the style of `node`, including everything it inherits.
///
/// Non-element nodes (and the document) get the initial style, so text nodes
/// never contribute declarations of their own. The user agent stylesheet is
/// always consulted before `sheet`.
#[must_use]
pub fn compute_style(tree: &DomTree, sheet: &Stylesheet, node: NodeId) -> ComputedStyle {
    let Some(element) = tree.as_element(node) else {
        return ComputedStyle::default();
    };
    let parent = tree
        .parent(node)
        .filter(|&p| tree.as_element(p).is_some())
        .map_or_else(ComputedStyle::default, |p| compute_style(tree, sheet, p));

    // STEP 1: Collect matching declarations with their cascade key.
    let mut matched: Vec<((Origin, (usize, usize, usize), usize), &Declaration)> = Vec::new();
    let all_rules = ua_stylesheet().rules.iter().chain(&sheet.rules);
    for (order, rule) in all_rules.enumerate() {
        if let Some(specificity) = rule.selector.matching_specificity(element) {
            matched.extend(
                rule.declarations
                    .iter()
                    .map(|decl| ((rule.origin, specificity, order), decl)),
            );
        }
    }
    // STEP 2: Sort by origin, specificity, order. Stable, so declarations of
    // one rule keep their source order.
    matched.sort_by_key(|(key, _)| *key);

    // STEP 3: The style attribute wins over every rule.
    let inline = element.inline_style().map(parse_declarations).unwrap_or_default();
    let winners: Vec<&Declaration> = matched
        .into_iter()
        .map(|(_, decl)| decl)
        .chain(inline.iter())
        .collect();

    // STEP 4: font-size first so relative line heights resolve against it.
    let mut style = ComputedStyle::inherit_from(&parent);
    for decl in winners.iter().filter(|d| d.property == "font-size") {
        style.apply(decl, parent.font_size);
    }
    for decl in winners.iter().filter(|d| d.property != "font-size") {
        style.apply(decl, parent.font_size);
    }
    style
}
