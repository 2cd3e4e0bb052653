//! Virtual-time replay of a page session.
//!
//! The page loads at t=0, the truncation is installed, and then every
//! scripted resize is delivered at its timestamp. Debounce deadlines that
//! fall between resizes fire before the next resize is applied, and any
//! deadline still pending at the end fires last.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clamp_browser::Document;
use clamp_browser::dom::NodeId;
use clamp_common::console::Console;
use clamp_truncate::{PassReport, ReadyState, Runtime, TruncationKind};
use serde::Serialize;

/// A viewport width change at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// New viewport width in CSS pixels.
    pub width: f32,
    /// When the resize happens, relative to page load.
    pub at: Duration,
}

impl FromStr for ResizeEvent {
    type Err = String;

    /// Parse `WIDTH@MS`, e.g. `320@50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected WIDTH@MS, got '{s}'"))?;
        let width: f32 = width
            .trim()
            .parse()
            .map_err(|_| format!("invalid width '{width}'"))?;
        if !width.is_finite() || width < 0.0 {
            return Err(format!("width must be a non-negative number, got '{width}'"));
        }
        let ms: u64 = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid time '{at}'"))?;
        Ok(Self {
            width,
            at: Duration::from_millis(ms),
        })
    }
}

/// What caused a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// The pass run when the page became ready.
    Initial,
    /// A debounced resize pass.
    Resize,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Resize => write!(f, "resize"),
        }
    }
}

/// One element's state after a pass.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingSnapshot {
    /// `tag#id.class` label.
    pub element: String,
    /// Displayed text.
    pub text: String,
    /// Whether and where it was cut.
    pub kind: TruncationKind,
    /// Height budget in pixels.
    pub budget: f32,
    /// Oracle calls spent.
    pub measurements: usize,
}

/// The page after one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassSnapshot {
    /// Virtual time of the pass in milliseconds.
    pub at_ms: u64,
    /// What caused it.
    pub trigger: Trigger,
    /// Viewport width during the pass.
    pub viewport_width: f32,
    /// Measured elements in tree order.
    pub headings: Vec<HeadingSnapshot>,
    /// Labels of matched elements skipped for having no box.
    pub skipped: Vec<String>,
}

impl PassSnapshot {
    #[allow(clippy::cast_possible_truncation)]
    fn new(document: &Document, at: Duration, trigger: Trigger, report: &PassReport<NodeId>) -> Self {
        Self {
            at_ms: at.as_millis() as u64,
            trigger,
            viewport_width: document.viewport().width,
            headings: report
                .elements
                .iter()
                .map(|r| HeadingSnapshot {
                    element: document.describe(r.element),
                    text: r.text.clone(),
                    kind: r.kind,
                    budget: r.budget,
                    measurements: r.measurements,
                })
                .collect(),
            skipped: report.skipped.iter().map(|&n| document.describe(n)).collect(),
        }
    }
}

/// Install `runtime` on `document` and replay `resizes`.
///
/// A document that is still loading becomes interactive at t=0, right
/// after installation.
pub fn replay<C>(
    runtime: &mut Runtime<NodeId>,
    document: &mut Document,
    resizes: &[ResizeEvent],
    console: &mut C,
) -> Vec<PassSnapshot>
where
    C: Console + ?Sized,
{
    let mut passes = Vec::new();
    let start = Duration::ZERO;

    let ready_state = document.ready_state();
    let initial = match runtime.install(document, ready_state, console) {
        Some(report) => Some(report),
        None => {
            document.set_ready_state(ReadyState::Interactive);
            runtime.on_ready(document, console)
        }
    };
    if let Some(report) = initial {
        passes.push(PassSnapshot::new(document, start, Trigger::Initial, &report));
    }

    let mut events = resizes.to_vec();
    events.sort_by_key(|e| e.at);
    for event in events {
        fire_due(runtime, document, event.at, &mut passes);
        document.set_viewport_width(event.width);
        runtime.on_resize(event.at);
    }
    if let Some(deadline) = runtime.next_deadline() {
        fire_due(runtime, document, deadline, &mut passes);
    }
    passes
}

/// Fire the pending pass if its deadline is at or before `now`.
fn fire_due(
    runtime: &mut Runtime<NodeId>,
    document: &mut Document,
    now: Duration,
    passes: &mut Vec<PassSnapshot>,
) {
    let Some(deadline) = runtime.next_deadline().filter(|&d| d <= now) else {
        return;
    };
    if let Some(report) = runtime.tick(document, deadline) {
        passes.push(PassSnapshot::new(document, deadline, Trigger::Resize, &report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clamp_browser::parse_page;
    use clamp_common::console::BufferConsole;
    use clamp_truncate::TruncateConfig;

    const PAGE: &str = r#"{
        "viewport": { "width": 60 },
        "ready_state": "loading",
        "css": ".a-heading { font-size: 10px; line-height: 12px }",
        "body": [
            { "tag": "h2", "id": "t", "class": "a-heading",
              "text": "The quick brown fox jumps over the lazy dog" }
        ]
    }"#;

    fn resize(width: f32, ms: u64) -> ResizeEvent {
        ResizeEvent {
            width,
            at: Duration::from_millis(ms),
        }
    }

    #[test]
    fn parses_resize_events() {
        assert_eq!("320@50".parse::<ResizeEvent>().unwrap(), resize(320.0, 50));
        assert_eq!(" 12.5 @ 0 ".parse::<ResizeEvent>().unwrap(), resize(12.5, 0));
        assert!("320".parse::<ResizeEvent>().is_err());
        assert!("wide@50".parse::<ResizeEvent>().is_err());
        assert!("-1@50".parse::<ResizeEvent>().is_err());
        assert!("320@soon".parse::<ResizeEvent>().is_err());
    }

    #[test]
    fn replays_initial_and_coalesced_resize_passes() {
        let mut document = parse_page(PAGE).unwrap();
        let mut runtime = Runtime::new(&TruncateConfig::default()).unwrap();
        let mut console = BufferConsole::new();
        let resizes: Vec<ResizeEvent> = (0..10).map(|i| resize(600.0, 100 + i * 5)).collect();

        let passes = replay(&mut runtime, &mut document, &resizes, &mut console);

        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].trigger, Trigger::Initial);
        assert_eq!(passes[0].headings[0].element, "h2#t.a-heading");
        assert_eq!(passes[0].headings[0].text, "The quick brown...");
        assert_eq!(passes[1].trigger, Trigger::Resize);
        assert_eq!(passes[1].at_ms, 295);
        assert_eq!(passes[1].viewport_width, 600.0);
        assert_eq!(passes[1].headings[0].kind, TruncationKind::Unchanged);
        assert_eq!(console.lines().len(), 1);
    }

    #[test]
    fn separate_bursts_each_get_a_pass() {
        let mut document = parse_page(PAGE).unwrap();
        let mut runtime = Runtime::new(&TruncateConfig::default()).unwrap();
        let resizes = [resize(30.0, 1_000), resize(600.0, 100)];

        let passes = replay(&mut runtime, &mut document, &resizes, &mut BufferConsole::new());

        let times: Vec<u64> = passes.iter().map(|p| p.at_ms).collect();
        assert_eq!(times, [0, 250, 1_150]);
        assert_eq!(passes[2].viewport_width, 30.0);
    }
}
