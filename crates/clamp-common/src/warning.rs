//! Deduplicated warnings with colored terminal output.
//!
//! Style and fixture code report unsupported properties, units and keywords
//! here. Each distinct message is printed once per process (or until
//! [`clear_warnings`] is called), so a page with hundreds of headings that all
//! use `line-height: 1.2rem` produces one line, not hundreds.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Messages already printed, keyed by `[component] message`.
static WARNED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Warn about unsupported input (prints once per unique message).
///
/// Returns `true` if this call printed the warning, `false` if the same
/// message had already been reported.
///
/// # Example
/// ```
/// use clamp_common::warning::warn_once;
///
/// let _ = warn_once("CSS", "unsupported unit 'rem' in line-height: 1.2rem");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key);

    if first {
        eprintln!("{}", format!("[clamp {component}] warning: {message}").yellow());
    }
    first
}

/// Clear all recorded warnings (call when loading a new page).
pub fn clear_warnings() {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner).clear();
}
