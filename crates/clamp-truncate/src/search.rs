//! Truncation search.
//!
//! Finds the longest prefix of a text that, followed by an ellipsis, still
//! renders within a height budget. The only knowledge of rendering is the
//! `measure` callback, which must return the height a candidate string
//! would occupy; the search assumes height never decreases as the prefix
//! grows, which holds for left-to-right line wrapping.
//!
//! Prefix lengths are counted in `char`s, so cuts always land on UTF-8
//! boundaries.

use serde::Serialize;
use strum_macros::Display;

/// Suffix appended to truncated text.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Slack added to the budget to absorb sub-pixel rounding in the renderer.
pub const DEFAULT_TOLERANCE: f32 = 0.5;

/// Tunables shared by every search in a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Marker appended to truncated text.
    pub ellipsis: String,
    /// A candidate fits when `measure(candidate) <= max_height + tolerance`.
    pub tolerance: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ellipsis: DEFAULT_ELLIPSIS.to_owned(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SearchOptions {
    fn fits(&self, height: f32, max_height: f32) -> bool {
        height <= max_height + self.tolerance
    }
}

/// How a [`Truncation`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TruncationKind {
    /// The full text fit; nothing was cut.
    Unchanged,
    /// Cut at a whitespace boundary.
    WordBoundary,
    /// Cut inside a word because no word boundary fit.
    MidWord,
}

/// Result of [`truncate_to_height`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// Text to display.
    pub text: String,
    /// Whether and where the text was cut.
    pub kind: TruncationKind,
    /// Number of times `measure` was called.
    pub measurements: usize,
}

/// Outcome of [`longest_fitting_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSearch {
    /// The longest fitting prefix, trailing whitespace trimmed. Empty when
    /// not even the bare ellipsis fits.
    pub prefix: String,
    /// Number of times `measure` was called.
    pub measurements: usize,
}

/// Binary search for the longest strict prefix of `full` such that
/// `trim_end(prefix) + ellipsis` fits in `max_height`.
///
/// Only strict prefixes (lengths `0..len`) are considered. With a
/// non-decreasing `measure` the result is exact: no longer strict prefix
/// fits. Uses `O(log n)` measurements.
pub fn longest_fitting_prefix<M>(
    full: &str,
    max_height: f32,
    options: &SearchOptions,
    mut measure: M,
) -> PrefixSearch
where
    M: FnMut(&str) -> f32,
{
    // boundaries[k] is the byte offset just past the first k chars.
    let boundaries: Vec<usize> = full
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(full.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    if char_count == 0 {
        return PrefixSearch {
            prefix: String::new(),
            measurements: 0,
        };
    }

    let mut best = String::new();
    let mut measurements = 0;
    let mut low = 0;
    let mut high = char_count.saturating_sub(1);

    while low <= high {
        let mid = low + (high - low) / 2;
        let prefix = full[..boundaries[mid]].trim_end();
        let candidate = format!("{prefix}{}", options.ellipsis);
        measurements += 1;

        if options.fits(measure(&candidate), max_height) {
            prefix.clone_into(&mut best);
            low = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            high = mid - 1;
        }
    }

    PrefixSearch {
        prefix: best,
        measurements,
    }
}

/// Truncate `full` so that it renders within `max_height`.
///
/// 1. If `full` already fits it is returned unchanged (one measurement).
/// 2. Otherwise [`longest_fitting_prefix`] finds the longest fitting cut.
/// 3. If that cut already ends where a word ends, it is used as is.
///    Otherwise the cut is pulled back to the last whitespace inside it and
///    re-measured once; if that fits it wins.
/// 4. Failing that, the text is cut mid-word.
///
/// Never fails: if nothing fits, the result is the bare ellipsis, which may
/// still overflow. Empty text is always returned unchanged.
pub fn truncate_to_height<M>(
    full: &str,
    max_height: f32,
    options: &SearchOptions,
    mut measure: M,
) -> Truncation
where
    M: FnMut(&str) -> f32,
{
    if options.fits(measure(full), max_height) || full.is_empty() {
        return Truncation {
            text: full.to_owned(),
            kind: TruncationKind::Unchanged,
            measurements: 1,
        };
    }

    let search = longest_fitting_prefix(full, max_height, options, &mut measure);
    let mut measurements = 1 + search.measurements;
    let best = search.prefix;
    let ellipsis = options.ellipsis.as_str();

    let ends_at_word = !best.is_empty()
        && full
            .chars()
            .nth(best.chars().count())
            .is_some_and(char::is_whitespace);
    if ends_at_word {
        return Truncation {
            text: format!("{best}{ellipsis}"),
            kind: TruncationKind::WordBoundary,
            measurements,
        };
    }

    let last_space = best
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_whitespace())
        .map(|(i, _)| i);
    if let Some(space) = last_space.filter(|&i| i > 0) {
        let word_cut = format!("{}{ellipsis}", best[..space].trim_end());
        measurements += 1;
        if options.fits(measure(&word_cut), max_height) {
            return Truncation {
                text: word_cut,
                kind: TruncationKind::WordBoundary,
                measurements,
            };
        }
    }

    Truncation {
        text: format!("{best}{ellipsis}"),
        kind: TruncationKind::MidWord,
        measurements,
    }
}
