//! Declaration blocks and computed style.
//!
//! [CSS Syntax § 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)

use clamp_common::warning::warn_once;
use serde::Serialize;

use crate::values::{
    DEFAULT_FONT_SIZE_PX, DisplayValue, LengthValue, LineHeight, parse_font_size, parse_length,
    parse_line_height,
};

/// One `property: value` pair from a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    /// Raw value text, trimmed, without `!important`.
    pub value: String,
}

/// Parse the contents of a declaration block (`font-size: 18px; width: 50%`).
///
/// Comments are stripped, empty declarations skipped, and a declaration
/// without a colon is dropped the way a CSS parser drops invalid input.
#[must_use]
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    strip_comments(block)
        .split(';')
        .filter_map(|raw| {
            let (property, value) = raw.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map_or(value, str::trim_end);
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property,
                value: value.to_owned(),
            })
        })
        .collect()
}

/// Remove `/* ... */` comments. An unterminated comment runs to the end.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// The computed values the host needs for measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// Outer display type. Not inherited.
    pub display: DisplayValue,
    /// Computed font size in pixels. Inherited.
    pub font_size: f32,
    /// Computed line height. Inherited.
    pub line_height: LineHeight,
    /// Specified width; `None` is `auto`. Not inherited.
    pub width: Option<LengthValue>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: DisplayValue::Block,
            font_size: DEFAULT_FONT_SIZE_PX,
            line_height: LineHeight::Normal,
            width: None,
        }
    }
}

impl ComputedStyle {
    /// Start a child's style: inherited properties copied, the rest reset
    /// to their initial values.
    #[must_use]
    pub fn inherit_from(parent: &Self) -> Self {
        Self {
            font_size: parent.font_size,
            line_height: parent.line_height,
            ..Self::default()
        }
    }

    /// Apply one declaration. `parent_font_size` resolves relative
    /// `font-size` values.
    ///
    /// Callers apply `font-size` before `line-height` so `em` line heights
    /// see the element's own font size.
    pub fn apply(&mut self, decl: &Declaration, parent_font_size: f32) {
        let value = decl.value.as_str();
        let ok = match decl.property.as_str() {
            "font-size" => parse_font_size(value, parent_font_size)
                .map(|px| self.font_size = px)
                .is_some(),
            "line-height" => parse_line_height(value, self.font_size)
                .map(|lh| self.line_height = lh)
                .is_some(),
            "width" if value.eq_ignore_ascii_case("auto") => {
                self.width = None;
                true
            }
            "width" => match parse_length(value) {
                Some(LengthValue::Px(v) | LengthValue::Em(v) | LengthValue::Percent(v)) if v < 0.0 => {
                    false
                }
                Some(len) => {
                    self.width = Some(len);
                    true
                }
                None => false,
            },
            "display" => value
                .parse::<DisplayValue>()
                .map(|d| self.display = d)
                .is_ok(),
            _ => {
                let _ = warn_once("CSS", &format!("unsupported property '{}'", decl.property));
                return;
            }
        };

        if !ok {
            let _ = warn_once(
                "CSS",
                &format!("unsupported value in {}: {value}", decl.property),
            );
        }
    }

    /// The used line height in pixels as a script would read it back, or
    /// `None` when the computed value is `normal`.
    #[must_use]
    pub fn line_height_px(&self) -> Option<f32> {
        self.line_height.to_px(self.font_size)
    }
}
