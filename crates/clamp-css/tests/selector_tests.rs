//! Integration tests for selector parsing and matching.

use clamp_css::{Selector, SelectorError};
use clamp_dom::{DomTree, ElementData, NodeId};

fn heading(class: &str) -> ElementData {
    ElementData::new("h2").with_attr("class", class)
}

#[test]
fn test_class_selector_matches_any_tag() {
    let selector = Selector::parse(".a-heading").unwrap();
    assert!(selector.matches(&heading("a-heading")));
    assert!(selector.matches(&ElementData::new("p").with_attr("class", "x a-heading")));
    assert!(!selector.matches(&heading("b-heading")));
}

#[test]
fn test_compound_requires_every_part() {
    let selector = Selector::parse("h2#lead.a-heading.big").unwrap();
    let full = heading("a-heading big").with_attr("id", "lead");
    assert!(selector.matches(&full));
    assert!(!selector.matches(&heading("a-heading big")));
    assert!(!selector.matches(&ElementData::new("h3").with_attr("class", "a-heading big").with_attr("id", "lead")));
}

#[test]
fn test_type_selector_is_case_insensitive() {
    let selector = Selector::parse("H2").unwrap();
    assert!(selector.matches(&ElementData::new("h2")));
}

#[test]
fn test_selector_list_matches_any_member() {
    let selector = Selector::parse("h1.title, .a-heading").unwrap();
    assert_eq!(selector.alternatives().len(), 2);
    assert!(selector.matches(&heading("a-heading")));
    assert!(selector.matches(&ElementData::new("h1").with_attr("class", "title")));
    assert!(!selector.matches(&ElementData::new("h2").with_attr("class", "title")));
    assert_eq!(selector.to_string(), "h1.title, .a-heading");
}

#[test]
fn test_specificity_prefers_ids_then_classes() {
    let selector = Selector::parse("h2, .a-heading, #lead").unwrap();
    let element = heading("a-heading").with_attr("id", "lead");
    assert_eq!(selector.matching_specificity(&element), Some((1, 0, 0)));
    assert_eq!(selector.matching_specificity(&heading("a-heading")), Some((0, 1, 0)));
    assert_eq!(selector.matching_specificity(&ElementData::new("p")), None);
}

#[test]
fn test_rejects_unsupported_syntax() {
    assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    assert_eq!(Selector::parse(".a,"), Err(SelectorError::Empty));
    assert!(matches!(
        Selector::parse("div .a-heading"),
        Err(SelectorError::Unsupported { found: ' ', .. })
    ));
    assert!(matches!(
        Selector::parse("a:hover"),
        Err(SelectorError::Unsupported { found: ':', .. })
    ));
    assert!(matches!(
        Selector::parse("h2."),
        Err(SelectorError::MissingName { sigil: '.', .. })
    ));
}

#[test]
fn test_query_all_returns_tree_order() {
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let first = tree.append_element(body, heading("a-heading"));
    let section = tree.append_element(body, ElementData::new("section"));
    let nested = tree.append_element(section, heading("a-heading"));
    let _other = tree.append_element(body, heading("other"));

    let selector = Selector::parse(".a-heading").unwrap();
    assert_eq!(selector.query_all(&tree, NodeId::ROOT), vec![first, nested]);
}
