//! Integration tests for element measurement.
//!
//! All tests use `ApproximateFontMetrics` at 10px, where every character is
//! 6px wide and `line-height: normal` is 12px.

use clamp_css::cascade::Origin;
use clamp_css::{ApproximateFontMetrics, LayoutContext, Rect, Stylesheet};
use clamp_dom::{DomTree, ElementData, NodeId};

struct Page {
    tree: DomTree,
    sheet: Stylesheet,
}

impl Page {
    fn new(css: &str) -> Self {
        Self {
            tree: DomTree::new(),
            sheet: Stylesheet::parse(css, Origin::Author).unwrap(),
        }
    }

    fn layout(&self, viewport_width: f32) -> LayoutContext<'_> {
        LayoutContext {
            tree: &self.tree,
            sheet: &self.sheet,
            metrics: &ApproximateFontMetrics,
            viewport: Rect::sized(viewport_width, 600.0),
        }
    }

    fn heading(&mut self, parent: NodeId, style: &str, text: &str) -> NodeId {
        let id = self.tree.append_element(
            parent,
            ElementData::new("p").with_attr("class", "a-heading").with_attr("style", style),
        );
        let _ = self.tree.append_text(id, text);
        id
    }
}

#[test]
fn test_scroll_height_counts_lines() {
    let mut page = Page::new("p { font-size: 10px }");
    let h = page.heading(NodeId::ROOT, "", "alpha beta gamma delta");
    // 60px wide: "alpha beta" | "gamma" | "delta"
    assert_eq!(page.layout(60.0).lines(h), ["alpha beta", "gamma", "delta"]);
    assert_eq!(page.layout(60.0).scroll_height(h), 36.0);
    // Wide enough for everything.
    assert_eq!(page.layout(1000.0).scroll_height(h), 12.0);
}

#[test]
fn test_explicit_line_height_is_used() {
    let mut page = Page::new("p { font-size: 10px; line-height: 20px }");
    let h = page.heading(NodeId::ROOT, "", "alpha beta gamma delta");
    assert_eq!(page.layout(60.0).scroll_height(h), 60.0);
}

#[test]
fn test_percentage_width_resolves_against_parent() {
    let mut page = Page::new("p { font-size: 10px }");
    let wrapper = page.tree.append_element(
        NodeId::ROOT,
        ElementData::new("div").with_attr("style", "width: 50%"),
    );
    let h = page.heading(wrapper, "width: 200px", "x");
    let auto = page.heading(wrapper, "", "x");

    let layout = page.layout(400.0);
    assert_eq!(layout.content_width(wrapper), 200.0);
    assert_eq!(layout.content_width(auto), 200.0);
    assert_eq!(layout.bounding_rect(h), Rect::sized(200.0, 12.0));
}

#[test]
fn test_display_none_ancestor_hides_box() {
    let mut page = Page::new("p { font-size: 10px } .hidden { display: none }");
    let wrapper = page.tree.append_element(
        NodeId::ROOT,
        ElementData::new("div").with_attr("class", "hidden"),
    );
    let h = page.heading(wrapper, "", "never shown");

    let layout = page.layout(400.0);
    assert!(!layout.is_rendered(h));
    assert_eq!(layout.bounding_rect(h), Rect::default());
    assert_eq!(layout.scroll_height(h), 0.0);
}

#[test]
fn test_empty_heading_has_no_area() {
    let mut page = Page::new("");
    let h = page.heading(NodeId::ROOT, "", "   ");
    let rect = page.layout(400.0).bounding_rect(h);
    assert_eq!(rect.width, 400.0);
    assert!(!rect.has_area());
}
