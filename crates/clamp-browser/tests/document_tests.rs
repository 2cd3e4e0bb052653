//! End-to-end tests: page fixture → document → truncation runtime.
//!
//! Pages use `ApproximateFontMetrics` with headings at 10px / 12px line
//! height, so each character is 6px wide and a 60px column holds ten.

use std::time::Duration;

use clamp_browser::{Document, parse_page};
use clamp_common::console::BufferConsole;
use clamp_dom::{NodeId, NodeType};
use clamp_truncate::{
    ReadyState, RenderHost, Runtime, TruncateConfig, TruncationKind, Truncator,
};

const FOX: &str = "The quick brown fox jumps over the lazy dog";

fn page(viewport: u32, body: &str) -> Document {
    parse_page(&format!(
        r#"{{
            "viewport": {{ "width": {viewport}, "height": 600 }},
            "css": ".a-heading {{ font-size: 10px; line-height: 12px }}",
            "body": {body}
        }}"#
    ))
    .unwrap()
}

fn text(doc: &Document, id: &str) -> String {
    let node = doc.element_by_id(id).unwrap();
    doc.tree().text_content(node).unwrap()
}

fn node(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn runtime() -> Runtime<NodeId> {
    Runtime::new(&TruncateConfig::default()).unwrap()
}

#[test]
fn test_initial_pass_clamps_to_two_lines() {
    let mut doc = page(
        60,
        &format!(r#"[{{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}]"#),
    );
    let mut console = BufferConsole::new();
    let mut runtime = runtime();

    let report = runtime
        .install(&mut doc, ReadyState::Complete, &mut console)
        .unwrap();

    assert_eq!(text(&doc, "h"), "The quick brown...");
    assert_eq!(report.elements[0].kind, TruncationKind::WordBoundary);
    assert_eq!(doc.layout().scroll_height(node(&doc, "h")), 24.0);
    assert_eq!(console.lines().len(), 1);
}

#[test]
fn test_resize_round_trip_restores_full_text() {
    let mut doc = page(
        60,
        &format!(r#"[{{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}]"#),
    );
    let mut runtime = runtime();
    let _ = runtime.install(&mut doc, ReadyState::Complete, &mut BufferConsole::new());
    assert_eq!(text(&doc, "h"), "The quick brown...");

    doc.set_viewport_width(600.0);
    runtime.on_resize(ms(100));
    assert!(runtime.tick(&mut doc, ms(249)).is_none());
    assert!(runtime.tick(&mut doc, ms(250)).is_some());
    assert_eq!(text(&doc, "h"), FOX);

    doc.set_viewport_width(60.0);
    runtime.on_resize(ms(1_000));
    let _ = runtime.tick(&mut doc, ms(1_150));
    assert_eq!(text(&doc, "h"), "The quick brown...");
    assert_eq!(runtime.pass_count(), 3);
}

#[test]
fn test_percentage_width_follows_viewport() {
    let mut doc = page(
        120,
        &format!(
            r#"[{{ "style": "width: 50%", "children": [
                {{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}
            ]}}]"#
        ),
    );
    let mut truncator = Truncator::new(&TruncateConfig::default()).unwrap();
    let _ = truncator.apply(&mut doc);

    assert_eq!(doc.bounding_rect(node(&doc, "h")).width, 60.0);
    assert_eq!(text(&doc, "h"), "The quick brown...");
}

#[test]
fn test_display_none_ancestor_hides_heading() {
    let mut doc = page(
        60,
        &format!(
            r#"[
                {{ "style": "display: none", "children": [
                    {{ "tag": "h2", "id": "hidden", "class": "a-heading", "text": "{FOX}" }}
                ]}},
                {{ "tag": "h2", "id": "shown", "class": "a-heading", "text": "{FOX}" }}
            ]"#
        ),
    );
    let mut truncator = Truncator::new(&TruncateConfig::default()).unwrap();

    let report = truncator.apply(&mut doc);

    assert_eq!(report.skipped, vec![node(&doc, "hidden")]);
    assert_eq!(text(&doc, "hidden"), FOX);
    assert_eq!(text(&doc, "shown"), "The quick brown...");
}

#[test]
fn test_hidden_after_first_pass_keeps_original() {
    let mut doc = page(
        60,
        &format!(
            r#"[{{ "id": "wrap", "children": [
                {{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}
            ]}}]"#
        ),
    );
    let mut truncator = Truncator::new(&TruncateConfig::default()).unwrap();
    let _ = truncator.apply(&mut doc);

    let h = node(&doc, "h");
    let wrap = node(&doc, "wrap");
    let _ = doc
        .tree_mut()
        .get_mut(wrap)
        .and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => {
                data.attrs.insert("style".to_owned(), "display: none".to_owned())
            }
            _ => None,
        });

    let report = truncator.apply(&mut doc);
    assert_eq!(report.skipped, vec![h]);
    assert_eq!(truncator.original_text(h), Some(FOX));
}

#[test]
fn test_normal_line_height_uses_font_fallback() {
    let mut doc = parse_page(&format!(
        r#"{{
            "viewport": {{ "width": 60 }},
            "rules": [{{ "selector": ".a-heading", "style": "font-size: 10px" }}],
            "body": [{{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}]
        }}"#
    ))
    .unwrap();
    let mut truncator = Truncator::new(&TruncateConfig::default()).unwrap();

    let report = truncator.apply(&mut doc);

    assert_eq!(report.elements[0].budget, 24.0);
    assert_eq!(text(&doc, "h"), "The quick brown...");
}

#[test]
fn test_loading_page_waits_for_ready_signal() {
    let mut doc = parse_page(&format!(
        r#"{{
            "viewport": {{ "width": 60 }},
            "ready_state": "loading",
            "css": ".a-heading {{ font-size: 10px; line-height: 12px }}",
            "body": [{{ "tag": "h2", "id": "h", "class": "a-heading", "text": "{FOX}" }}]
        }}"#
    ))
    .unwrap();
    let mut console = BufferConsole::new();
    let mut runtime = runtime();

    let ready_state = doc.ready_state();
    assert!(runtime.install(&mut doc, ready_state, &mut console).is_none());
    assert_eq!(text(&doc, "h"), FOX);

    doc.set_ready_state(ReadyState::Interactive);
    assert!(runtime.on_ready(&mut doc, &mut console).is_some());
    assert_eq!(text(&doc, "h"), "The quick brown...");
    assert_eq!(
        console.lines(),
        ["truncation initialized for .a-heading (2 lines)"]
    );
}

#[test]
fn test_overflowing_word_keeps_its_line() {
    let mut doc = page(
        60,
        r#"[{ "tag": "h2", "id": "h", "class": "a-heading", "text": "Incomprehensibilities abound" }]"#,
    );
    let config = TruncateConfig {
        max_lines: 1,
        ..TruncateConfig::default()
    };
    let mut truncator = Truncator::new(&config).unwrap();

    let report = truncator.apply(&mut doc);

    // A word wider than the column overflows its single line instead of
    // wrapping, so it still counts as one line.
    assert_eq!(report.elements[0].kind, TruncationKind::WordBoundary);
    assert_eq!(text(&doc, "h"), "Incomprehensibilities...");
}
