//! Styling and layout measurement for the clamp headless host.
//!
//! Covers the slice of CSS that decides how tall a line-clamped heading is:
//!
//! - [`selector`] - compound selectors (`h2.a-heading`, `#hero`, lists)
//! - [`values`] - lengths, `line-height`, `display`
//! - [`style`] - declaration blocks and computed style
//! - [`cascade`] - stylesheets, UA defaults, inheritance
//! - [`layout`] - font metrics, line breaking, box measurement
//!
//! Anything outside that slice is reported through
//! [`clamp_common::warning::warn_once`] and ignored.

pub mod cascade;
pub mod layout;
pub mod selector;
pub mod style;
pub mod ua_stylesheet;
pub mod values;

pub use cascade::{StyleRule, Stylesheet, compute_style};
pub use layout::{ApproximateFontMetrics, FontMetrics, LayoutContext, Rect, break_lines};
pub use selector::{Selector, SelectorError};
pub use style::{ComputedStyle, Declaration, parse_declarations};
pub use values::{DEFAULT_FONT_SIZE_PX, DisplayValue, LengthValue, LineHeight};
