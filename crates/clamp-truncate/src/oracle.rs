//! The seams between the truncation core and whatever renders the text.

use std::fmt::Debug;
use std::hash::Hash;

use clamp_css::{Rect, Selector};

/// The rendering engine's answer to "how tall would this text be here?".
///
/// Implementations typically write `candidate` into the element and read
/// back its laid-out height, so a call may leave the element displaying
/// `candidate`. Callers write the final text themselves afterwards.
pub trait HeightOracle {
    /// Handle identifying an element. Must be stable for the element's lifetime.
    type Element: Copy + Eq + Hash + Debug;

    /// Rendered height of `candidate` inside `element` with its current
    /// style and width.
    fn measure(&mut self, element: Self::Element, candidate: &str) -> f32;
}

/// Line-related computed style of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Computed line height in pixels; `None` for `normal` or anything
    /// that does not parse as a number.
    pub line_height: Option<f32>,
    /// Computed font size in pixels; `None` if unavailable.
    pub font_size: Option<f32>,
}

/// Document-side capabilities the orchestrator and scanner need.
pub trait RenderHost: HeightOracle {
    /// All elements matching `selector`, in tree order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// The element's current text content, or `None` if it does not exist.
    fn text_content(&self, element: Self::Element) -> Option<String>;

    /// Replace the element's text content. Returns `false` if the element
    /// does not exist.
    fn set_text_content(&mut self, element: Self::Element, text: &str) -> bool;

    /// Line height and font size, or `None` if the element does not exist.
    fn line_metrics(&self, element: Self::Element) -> Option<LineMetrics>;

    /// The element's layout box. Zero-sized when it is not rendered.
    fn bounding_rect(&self, element: Self::Element) -> Rect;
}
