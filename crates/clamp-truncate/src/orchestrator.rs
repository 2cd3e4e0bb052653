//! Truncation orchestrator.
//!
//! Owns the side table of original texts and drives one element at a time
//! through budget computation, restore, search and write-back.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use clamp_css::Selector;
use serde::Serialize;

use crate::config::{ConfigError, TruncateConfig};
use crate::oracle::{LineMetrics, RenderHost};
use crate::scanner::scan;
use crate::search::{SearchOptions, TruncationKind, truncate_to_height};

/// Ratio used when an element has no usable line height.
pub const FALLBACK_LINE_HEIGHT_RATIO: f32 = 1.2;

/// Font size assumed when the host reports none.
pub const FALLBACK_FONT_SIZE_PX: f32 = 16.0;

/// Maximum rendered height for `max_lines` lines of an element.
///
/// Uses the computed line height when it is a positive finite number,
/// otherwise `font_size × 1.2`, and the default font size when even that is
/// missing. The result is always positive for `max_lines >= 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line_budget(metrics: LineMetrics, max_lines: u32) -> f32 {
    let usable = |v: &f32| v.is_finite() && *v > 0.0;
    let line_height = metrics.line_height.filter(usable).unwrap_or_else(|| {
        metrics.font_size.filter(usable).unwrap_or(FALLBACK_FONT_SIZE_PX) * FALLBACK_LINE_HEIGHT_RATIO
    });
    line_height * max_lines as f32
}

/// What happened to one element during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementReport<E> {
    /// The element.
    pub element: E,
    /// Text now displayed.
    pub text: String,
    /// Whether and where it was cut.
    pub kind: TruncationKind,
    /// Height budget used, in pixels.
    pub budget: f32,
    /// Oracle calls spent on this element.
    pub measurements: usize,
}

/// Summary of one Scanner → Orchestrator pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport<E> {
    /// Elements that were measured, in tree order.
    pub elements: Vec<ElementReport<E>>,
    /// Matched elements skipped for having no box.
    pub skipped: Vec<E>,
}

impl<E> Default for PassReport<E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<E> PassReport<E> {
    /// Number of elements whose text was cut.
    #[must_use]
    pub fn truncated_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|r| r.kind != TruncationKind::Unchanged)
            .count()
    }

    /// Total oracle calls in the pass.
    #[must_use]
    pub fn measurements(&self) -> usize {
        self.elements.iter().map(|r| r.measurements).sum()
    }
}

/// Clamps matched elements to `max_lines` lines.
#[derive(Debug, Clone)]
pub struct Truncator<E> {
    selector: Selector,
    max_lines: u32,
    options: SearchOptions,
    /// Original full text per element, captured on first visit.
    originals: HashMap<E, String>,
}

impl<E: Copy + Eq + Hash> Truncator<E> {
    /// Build a truncator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn new(config: &TruncateConfig) -> Result<Self, ConfigError> {
        let selector = config.validate()?;
        Ok(Self {
            selector,
            max_lines: config.max_lines,
            options: config.search_options(),
            originals: HashMap::new(),
        })
    }

    /// The selector this truncator scans for.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Maximum number of lines kept.
    #[must_use]
    pub const fn max_lines(&self) -> u32 {
        self.max_lines
    }

    /// The cached original text of `element`, if it has been visited.
    #[must_use]
    pub fn original_text(&self, element: E) -> Option<&str> {
        self.originals.get(&element).map(String::as_str)
    }

    /// Number of elements with a cached original text.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.originals.len()
    }

    /// Truncate a single element in place.
    ///
    /// Returns `None`, leaving everything untouched, when the element does
    /// not exist in `host`.
    pub fn truncate_element<H>(&mut self, host: &mut H, element: E) -> Option<ElementReport<E>>
    where
        H: RenderHost<Element = E>,
    {
        let metrics = host.line_metrics(element)?;

        // STEP 1: Capture the original text once; later passes restore from it.
        let full = match self.originals.entry(element) {
            Entry::Occupied(cached) => cached.get().clone(),
            Entry::Vacant(slot) => {
                let text = host.text_content(element)?;
                slot.insert(text.trim().to_owned()).clone()
            }
        };

        // STEP 2: Budget from this element's own style.
        let budget = line_budget(metrics, self.max_lines);

        // STEP 3: Measure from a known baseline.
        if !host.set_text_content(element, &full) {
            return None;
        }

        // STEP 4: Search against the live rendering, then write back.
        let truncation =
            truncate_to_height(&full, budget, &self.options, |candidate| {
                host.measure(element, candidate)
            });
        let _ = host.set_text_content(element, &truncation.text);

        Some(ElementReport {
            element,
            text: truncation.text,
            kind: truncation.kind,
            budget,
            measurements: truncation.measurements,
        })
    }

    /// Run one full pass over every visible matching element.
    ///
    /// Cached originals of elements that no longer match the selector are
    /// dropped; hidden but still matching elements keep theirs.
    pub fn apply<H>(&mut self, host: &mut H) -> PassReport<E>
    where
        H: RenderHost<Element = E>,
    {
        let scan = scan(host, &self.selector);
        self.originals.retain(|element, _| scan.contains(element));

        let mut report = PassReport {
            elements: Vec::with_capacity(scan.visible.len()),
            skipped: scan.hidden,
        };
        for element in scan.visible {
            if let Some(element_report) = self.truncate_element(host, element) {
                report.elements.push(element_report);
            }
        }
        report
    }

    /// Write every cached original text back and forget the cache.
    pub fn restore<H>(&mut self, host: &mut H)
    where
        H: RenderHost<Element = E>,
    {
        for (element, text) in self.originals.drain() {
            let _ = host.set_text_content(element, &text);
        }
    }
}
