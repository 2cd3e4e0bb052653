//! Layout measurement.
//!
//! - [`box_model`] - rectangles
//! - [`inline`] - font metrics and line breaking
//! - [`block`] - containing-block widths, scroll height, bounding boxes

pub mod block;
pub mod box_model;
pub mod inline;

pub use block::LayoutContext;
pub use box_model::Rect;
pub use inline::{ApproximateFontMetrics, FontMetrics, break_lines};
