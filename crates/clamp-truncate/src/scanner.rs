//! Element scanner: which matched elements get truncated this pass.

use clamp_css::Selector;

use crate::oracle::RenderHost;

/// Elements matched by a selector, split by whether they have a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<E> {
    /// Matched elements with positive width and height, in tree order.
    pub visible: Vec<E>,
    /// Matched elements with a zero-sized box (hidden, detached, empty).
    pub hidden: Vec<E>,
}

impl<E> Default for Scan<E> {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            hidden: Vec::new(),
        }
    }
}

impl<E: PartialEq> Scan<E> {
    /// Whether `element` was matched at all, visible or not.
    pub fn contains(&self, element: &E) -> bool {
        self.visible.contains(element) || self.hidden.contains(element)
    }
}

/// Select every element matching `selector` and keep the ones that render
/// a box with positive width and height.
///
/// Hidden elements are not an error; they are reported so the next pass
/// (usually after a resize) can pick them up once they have a box.
pub fn scan<H: RenderHost>(host: &H, selector: &Selector) -> Scan<H::Element> {
    let mut result = Scan::default();
    for element in host.query_selector_all(selector) {
        if host.bounding_rect(element).has_area() {
            result.visible.push(element);
        } else {
            result.hidden.push(element);
        }
    }
    result
}
