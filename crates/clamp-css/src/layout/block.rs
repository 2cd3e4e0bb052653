//! Block measurement.
//!
//! [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
//! [§ 10.6.3 Block-level non-replaced elements in normal flow when 'overflow' computes to 'visible'](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
//!
//! Each element is measured on its own: its content width comes from its
//! `width` or its containing block, and its height is the number of line
//! boxes its text content produces times the used line height. Padding,
//! borders, margins, floats and positioning do not exist here.

use clamp_dom::{DomTree, NodeId};

use super::box_model::Rect;
use super::inline::{FontMetrics, break_lines};
use crate::cascade::{Stylesheet, compute_style};
use crate::style::ComputedStyle;
use crate::values::DisplayValue;

/// Everything needed to measure an element: tree, styles, fonts, viewport.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// The document tree.
    pub tree: &'a DomTree,
    /// Author stylesheet (the UA sheet is implied).
    pub sheet: &'a Stylesheet,
    /// Glyph measurement.
    pub metrics: &'a dyn FontMetrics,
    /// The initial containing block.
    pub viewport: Rect,
}

impl LayoutContext<'_> {
    /// Computed style of `node`.
    #[must_use]
    pub fn style(&self, node: NodeId) -> ComputedStyle {
        compute_style(self.tree, self.sheet, node)
    }

    /// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
    ///
    /// "display: none: The element and its descendants generate no boxes or
    /// text runs." Detached nodes generate no boxes either.
    #[must_use]
    pub fn is_rendered(&self, node: NodeId) -> bool {
        self.tree.as_element(node).is_some()
            && self.tree.is_connected(node)
            && std::iter::once(node)
                .chain(self.tree.ancestors(node))
                .filter(|&n| self.tree.as_element(n).is_some())
                .all(|n| self.style(n).display != DisplayValue::None)
    }

    /// Width of the content box of `node`.
    ///
    /// "If 'width' is set to 'auto', any other 'auto' values become '0' and
    /// 'width' follows from the resulting equality", which with no margins,
    /// borders or padding is the containing block's width.
    #[must_use]
    pub fn content_width(&self, node: NodeId) -> f32 {
        let containing = self
            .tree
            .parent(node)
            .filter(|&p| self.tree.as_element(p).is_some())
            .map_or(self.viewport.width, |p| self.content_width(p));
        let style = self.style(node);
        style
            .width
            .map_or(containing, |w| w.resolve(style.font_size, containing))
            .max(0.0)
    }

    /// Used line height in pixels: the computed value, or the font's
    /// `normal` line height.
    #[must_use]
    pub fn used_line_height(&self, style: &ComputedStyle) -> f32 {
        style
            .line_height_px()
            .unwrap_or_else(|| self.metrics.line_height(style.font_size))
    }

    /// The line boxes `node`'s text content breaks into.
    #[must_use]
    pub fn lines(&self, node: NodeId) -> Vec<String> {
        let text = self.tree.text_content(node).unwrap_or_default();
        let style = self.style(node);
        break_lines(&text, self.content_width(node), style.font_size, self.metrics)
    }

    /// Height of the element's content, like `Element.scrollHeight`.
    ///
    /// Zero for elements that are not rendered and for empty text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_height(&self, node: NodeId) -> f32 {
        if !self.is_rendered(node) {
            return 0.0;
        }
        let style = self.style(node);
        self.lines(node).len() as f32 * self.used_line_height(&style)
    }

    /// Border box of `node`, like `Element.getBoundingClientRect()` minus
    /// position: all boxes are reported at the origin.
    #[must_use]
    pub fn bounding_rect(&self, node: NodeId) -> Rect {
        if !self.is_rendered(node) {
            return Rect::default();
        }
        Rect::sized(self.content_width(node), self.scroll_height(node))
    }
}
