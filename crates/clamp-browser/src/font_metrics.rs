//! Font metrics backed by fontdue for accurate text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::fs;
use std::path::Path;

use clamp_css::FontMetrics;
use fontdue::{Font, FontSettings};

use crate::LoadError;

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Owns the parsed font so a [`crate::Document`] can hold it as a
/// `Box<dyn FontMetrics>` for its whole lifetime. Widths come from
/// `Font::metrics()`, which reads advance widths without rasterizing.
pub struct FontdueFontMetrics {
    font: Font,
}

impl FontdueFontMetrics {
    /// Wrap an already parsed font.
    #[must_use]
    pub const fn new(font: Font) -> Self {
        Self { font }
    }

    /// Parse a TrueType/OpenType font file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Font`] if fontdue rejects it.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font =
            Font::from_bytes(bytes, FontSettings::default()).map_err(|message| LoadError::Font {
                path: path.to_path_buf(),
                message: message.to_owned(),
            })?;
        Ok(Self::new(font))
    }

    /// The wrapped font.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }
}

impl FontMetrics for FontdueFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        // Control characters have no advance.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_height(&self, font_size: f32) -> f32 {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        font_size * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FontdueFontMetrics::from_path(Path::new("/nonexistent/font.ttf"))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_are_a_font_error() {
        let path = std::env::temp_dir().join("clamp-not-a-font.ttf");
        fs::write(&path, b"definitely not a font").unwrap();
        let err = FontdueFontMetrics::from_path(&path).err().unwrap();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, LoadError::Font { .. }));
    }
}
