//! JSON page fixtures.
//!
//! A fixture describes a page directly as a tree instead of as HTML:
//!
//! ```json
//! {
//!   "viewport": { "width": 360, "height": 640 },
//!   "ready_state": "loading",
//!   "css": ".card { width: 50% }",
//!   "rules": [
//!     { "selector": ".a-heading", "style": "font-size: 20px; line-height: 24px" }
//!   ],
//!   "body": [
//!     { "tag": "div", "class": "card", "children": [
//!       { "tag": "h2", "id": "first", "class": "a-heading", "text": "A long title" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! `css` is a stylesheet in text form; `rules` are applied after it in
//! order. Both are author-origin. Every top-level key is optional.

use std::fs;
use std::path::Path;

use clamp_common::warning::clear_warnings;
use clamp_css::cascade::{Origin, StyleRule};
use clamp_css::{Rect, Selector, Stylesheet, parse_declarations};
use clamp_dom::{DomTree, ElementData, NodeId};
use clamp_truncate::ReadyState;
use serde::Deserialize;

use crate::LoadError;
use crate::document::{DEFAULT_VIEWPORT, Document};

/// Top-level fixture object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageFixture {
    /// Initial viewport size.
    pub viewport: ViewportSpec,
    /// Document readiness when the truncation is installed.
    pub ready_state: ReadyState,
    /// Author stylesheet text.
    pub css: String,
    /// Extra author rules, applied after `css`.
    pub rules: Vec<RuleSpec>,
    /// Children of `<body>`.
    pub body: Vec<NodeSpec>,
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportSpec {
    /// Width of the initial containing block.
    pub width: f32,
    /// Height of the initial containing block.
    pub height: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT.width,
            height: DEFAULT_VIEWPORT.height,
        }
    }
}

/// One `selector { style }` rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Selector list.
    pub selector: String,
    /// Declaration block contents.
    #[serde(default)]
    pub style: String,
}

/// An element and its subtree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Tag name; defaults to `div`.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// `id` attribute.
    #[serde(default)]
    pub id: Option<String>,
    /// `class` attribute (space-separated).
    #[serde(default)]
    pub class: Option<String>,
    /// Inline `style` attribute.
    #[serde(default)]
    pub style: Option<String>,
    /// Text placed before any children.
    #[serde(default)]
    pub text: Option<String>,
    /// Child elements.
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_tag() -> String {
    "div".to_owned()
}

impl PageFixture {
    /// Build the document this fixture describes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Selector`] if a rule's selector does not parse.
    pub fn build(&self) -> Result<Document, LoadError> {
        let mut sheet = Stylesheet::parse(&self.css, Origin::Author)?;
        for rule in &self.rules {
            sheet.rules.push(StyleRule {
                selector: Selector::parse(&rule.selector)?,
                declarations: parse_declarations(&rule.style),
                origin: Origin::Author,
            });
        }

        let mut tree = DomTree::new();
        let html = tree.append_element(tree.root(), ElementData::new("html"));
        let body = tree.append_element(html, ElementData::new("body"));
        for node in &self.body {
            append_node(&mut tree, body, node);
        }

        let mut document = Document::new(tree, sheet);
        document.set_viewport(Rect::sized(self.viewport.width, self.viewport.height));
        document.set_ready_state(self.ready_state);
        Ok(document)
    }
}

fn append_node(tree: &mut DomTree, parent: NodeId, spec: &NodeSpec) {
    let mut data = ElementData::new(&spec.tag);
    for (name, value) in [("id", &spec.id), ("class", &spec.class), ("style", &spec.style)] {
        if let Some(value) = value {
            data = data.with_attr(name, value);
        }
    }
    let element = tree.append_element(parent, data);
    if let Some(text) = &spec.text {
        let _ = tree.append_text(element, text);
    }
    for child in &spec.children {
        append_node(tree, element, child);
    }
}

/// Parse a fixture from a JSON string and build its document.
///
/// Warnings already reported for a previous page are forgotten, so each
/// page reports its own unsupported style input.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed fixtures and
/// [`LoadError::Selector`] for bad rule selectors.
pub fn parse_page(json: &str) -> Result<Document, LoadError> {
    clear_warnings();
    let fixture: PageFixture = serde_json::from_str(json)?;
    fixture.build()
}

/// Read a fixture file and build its document.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as
/// [`parse_page`].
pub fn load_page(path: &Path) -> Result<Document, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_page(&json)
}
