//! Headless document host for clamp.
//!
//! # Scope
//!
//! This crate provides:
//! - **Page loading** - build a DOM and stylesheet from a JSON page fixture
//! - **Measurement** - [`Document`] implements [`clamp_truncate::RenderHost`]
//!   on top of `clamp-css` layout, so the truncation core can run against it
//! - **Fonts** - [`FontdueFontMetrics`] for real glyph advances
//!
//! # Not Yet Implemented
//!
//! - HTML input (fixtures describe the tree directly)
//! - Painting; only heights and boxes are computed

pub mod document;
pub mod fixture;
pub mod font_metrics;

pub use clamp_css as css;
pub use clamp_dom as dom;

pub use document::Document;
pub use fixture::{PageFixture, load_page, parse_page};
pub use font_metrics::FontdueFontMetrics;

use std::io;
use std::path::PathBuf;

use clamp_css::SelectorError;
use thiserror::Error;

/// Error type for page and font loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The page fixture is not valid JSON for the fixture schema.
    #[error("invalid page fixture: {0}")]
    Json(#[from] serde_json::Error),
    /// A style rule in the fixture has a selector outside the supported subset.
    #[error("invalid style rule: {0}")]
    Selector(#[from] SelectorError),
    /// The font file could not be parsed.
    #[error("failed to load font '{path}': {message}")]
    Font {
        /// Font file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}
