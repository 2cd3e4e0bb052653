//! CSS value types and parsing.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// "1px = 1/96th of 1in"
    Px(f32),
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

impl LengthValue {
    /// Resolve to pixels. `em` resolves against `font_size`, percentages
    /// against `percent_base`.
    #[must_use]
    pub fn resolve(self, font_size: f32, percent_base: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Em(em) => em * font_size,
            Self::Percent(pct) => pct * percent_base / 100.0,
        }
    }
}

/// Parse a single length token such as `16px`, `1.5em`, `120%` or `0`.
///
/// Returns `None` for unknown units and for non-numeric input. A bare number
/// is only a length when it is zero.
#[must_use]
pub fn parse_length(input: &str) -> Option<LengthValue> {
    let (number, unit) = split_number(input)?;
    match unit.to_ascii_lowercase().as_str() {
        "px" => Some(LengthValue::Px(number)),
        "em" => Some(LengthValue::Em(number)),
        "%" => Some(LengthValue::Percent(number)),
        "" if number == 0.0 => Some(LengthValue::Px(0.0)),
        _ => None,
    }
}

/// Split `1.5em` into `(1.5, "em")`.
fn split_number(input: &str) -> Option<(f32, &str)> {
    let input = input.trim();
    let end = input
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(input.len(), |(i, _)| i);
    let number: f32 = input[..end].parse().ok()?;
    number.is_finite().then_some((number, &input[end..]))
}

/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// Parse a `font-size` value against the parent's computed font size.
/// Absolute-size keywords use the CSS Fonts 4 table for a 16px medium.
#[must_use]
pub fn parse_font_size(input: &str, parent_font_size: f32) -> Option<f32> {
    let keyword = match input.trim().to_ascii_lowercase().as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "xxx-large" => Some(48.0),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }
    // "Percentages: refer to parent element's font size"
    let px = parse_length(input)?.resolve(parent_font_size, parent_font_size);
    (px >= 0.0).then_some(px)
}

/// Computed `line-height`.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// A unitless number stays a number after computation (children multiply it
/// by their own font size); lengths and percentages compute to absolute
/// pixels against the element's font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value
    /// based on the font of the element."
    #[default]
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(f32),
    /// An absolute line height in pixels.
    Px(f32),
}

impl LineHeight {
    /// The pixel value a script would read back from the computed style,
    /// or `None` for `normal`.
    #[must_use]
    pub fn to_px(self, font_size: f32) -> Option<f32> {
        match self {
            Self::Normal => None,
            Self::Number(n) => Some(n * font_size),
            Self::Px(px) => Some(px),
        }
    }
}

/// Parse a `line-height` value for an element whose font size is `font_size`.
///
/// "Negative values are illegal."
#[must_use]
pub fn parse_line_height(input: &str, font_size: f32) -> Option<LineHeight> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("normal") {
        return Some(LineHeight::Normal);
    }
    let (number, unit) = split_number(input)?;
    if number < 0.0 {
        return None;
    }
    if unit.is_empty() {
        return Some(LineHeight::Number(number));
    }
    parse_length(input).map(|len| LineHeight::Px(len.resolve(font_size, font_size)))
}

/// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The outer display types the host distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DisplayValue {
    /// Block-level box.
    #[default]
    Block,
    /// Inline-level box. Measured like a block for truncation purposes.
    Inline,
    /// Inline-level block container.
    InlineBlock,
    /// Flex container; its own text lays out like a block.
    Flex,
    /// List item.
    ListItem,
    /// "The element and its descendants generate no boxes or text runs."
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_parse_with_units() {
        assert_eq!(parse_length("16px"), Some(LengthValue::Px(16.0)));
        assert_eq!(parse_length(" 1.5EM "), Some(LengthValue::Em(1.5)));
        assert_eq!(parse_length("50%"), Some(LengthValue::Percent(50.0)));
        assert_eq!(parse_length("0"), Some(LengthValue::Px(0.0)));
        assert_eq!(parse_length("12"), None);
        assert_eq!(parse_length("2rem"), None);
        assert_eq!(parse_length("wide"), None);
    }

    #[test]
    fn line_height_forms() {
        assert_eq!(parse_line_height("normal", 16.0), Some(LineHeight::Normal));
        assert_eq!(parse_line_height("1.25", 16.0), Some(LineHeight::Number(1.25)));
        assert_eq!(parse_line_height("24px", 16.0), Some(LineHeight::Px(24.0)));
        assert_eq!(parse_line_height("1.5em", 20.0), Some(LineHeight::Px(30.0)));
        assert_eq!(parse_line_height("150%", 20.0), Some(LineHeight::Px(30.0)));
        assert_eq!(parse_line_height("-2px", 16.0), None);
        assert_eq!(parse_line_height("tall", 16.0), None);
    }

    #[test]
    fn font_size_keywords_and_relative_units() {
        assert_eq!(parse_font_size("large", 16.0), Some(18.0));
        assert_eq!(parse_font_size("2em", 12.0), Some(24.0));
        assert_eq!(parse_font_size("150%", 20.0), Some(30.0));
        assert_eq!(parse_font_size("-3px", 16.0), None);
    }

    #[test]
    fn display_keywords() {
        assert_eq!("inline-block".parse::<DisplayValue>(), Ok(DisplayValue::InlineBlock));
        assert_eq!("NONE".parse::<DisplayValue>(), Ok(DisplayValue::None));
        assert!("grid-lanes".parse::<DisplayValue>().is_err());
        assert_eq!(DisplayValue::ListItem.to_string(), "list-item");
    }
}
