//! A loaded page that the truncation core can measure.

use std::fmt;

use clamp_css::{ApproximateFontMetrics, FontMetrics, LayoutContext, Rect, Selector, Stylesheet};
use clamp_dom::{DomTree, NodeId};
use clamp_truncate::{HeightOracle, LineMetrics, ReadyState, RenderHost};

/// Viewport used when a page does not specify one.
pub const DEFAULT_VIEWPORT: Rect = Rect::sized(1024.0, 768.0);

/// A parsed page: DOM, author stylesheet, fonts and viewport.
///
/// Every measurement re-runs style and layout for the element asked about,
/// so results are accurate right after a text mutation.
pub struct Document {
    tree: DomTree,
    sheet: Stylesheet,
    metrics: Box<dyn FontMetrics>,
    viewport: Rect,
    ready_state: ReadyState,
}

impl Document {
    /// Create a document with approximate font metrics, a default viewport
    /// and a `complete` ready state.
    #[must_use]
    pub fn new(tree: DomTree, sheet: Stylesheet) -> Self {
        Self {
            tree,
            sheet,
            metrics: Box::new(ApproximateFontMetrics),
            viewport: DEFAULT_VIEWPORT,
            ready_state: ReadyState::Complete,
        }
    }

    /// The DOM tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the DOM tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The author stylesheet.
    #[must_use]
    pub const fn stylesheet(&self) -> &Stylesheet {
        &self.sheet
    }

    /// Replace the font metrics used for layout.
    pub fn set_font_metrics(&mut self, metrics: Box<dyn FontMetrics>) {
        self.metrics = metrics;
    }

    /// The viewport (initial containing block).
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the viewport.
    pub const fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Resize the viewport horizontally, keeping its height.
    pub const fn set_viewport_width(&mut self, width: f32) {
        self.viewport.width = width;
    }

    /// [§ 3.1.8 Current document readiness](https://html.spec.whatwg.org/multipage/dom.html#current-document-readiness)
    #[must_use]
    pub const fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Update the ready state, e.g. when a loading page finishes parsing.
    pub const fn set_ready_state(&mut self, ready_state: ReadyState) {
        self.ready_state = ready_state;
    }

    /// Layout view over the current tree and viewport.
    #[must_use]
    pub fn layout(&self) -> LayoutContext<'_> {
        LayoutContext {
            tree: &self.tree,
            sheet: &self.sheet,
            metrics: self.metrics.as_ref(),
            viewport: self.viewport,
        }
    }

    /// [§ 4.2.4 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "Returns the first element within node's descendants whose ID is
    /// elementId."
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&node| {
            self.tree
                .as_element(node)
                .is_some_and(|e| e.id() == Some(id))
        })
    }

    /// A short label for an element: `tag#id.class`.
    #[must_use]
    pub fn describe(&self, node: NodeId) -> String {
        let Some(element) = self.tree.as_element(node) else {
            return format!("#node{}", node.0);
        };
        let mut label = element.tag_name.clone();
        if let Some(id) = element.id() {
            label.push('#');
            label.push_str(id);
        }
        for class in element.classes() {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.tree.as_element(node).is_some()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("rules", &self.sheet.rules.len())
            .field("viewport", &self.viewport)
            .field("ready_state", &self.ready_state)
            .finish_non_exhaustive()
    }
}

impl HeightOracle for Document {
    type Element = NodeId;

    /// Write `candidate` into the element and read back its scroll height.
    fn measure(&mut self, element: NodeId, candidate: &str) -> f32 {
        if !self.is_element(element) || !self.tree.set_text_content(element, candidate) {
            return 0.0;
        }
        self.layout().scroll_height(element)
    }
}

impl RenderHost for Document {
    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        selector.query_all(&self.tree, self.tree.root())
    }

    fn text_content(&self, element: NodeId) -> Option<String> {
        if !self.is_element(element) {
            return None;
        }
        self.tree.text_content(element)
    }

    fn set_text_content(&mut self, element: NodeId, text: &str) -> bool {
        self.is_element(element) && self.tree.set_text_content(element, text)
    }

    fn line_metrics(&self, element: NodeId) -> Option<LineMetrics> {
        if !self.is_element(element) {
            return None;
        }
        // `line-height: normal` has no numeric computed value.
        let style = self.layout().style(element);
        Some(LineMetrics {
            line_height: style.line_height_px(),
            font_size: Some(style.font_size),
        })
    }

    fn bounding_rect(&self, element: NodeId) -> Rect {
        self.layout().bounding_rect(element)
    }
}
