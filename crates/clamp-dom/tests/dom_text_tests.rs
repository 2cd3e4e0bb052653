//! Tests for tree mutation and the textContent getter/setter.

use clamp_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node under `parent` and return its NodeId.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag))
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert!(!tree.is_connected(b));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let other = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, parent, "p");

    tree.remove_child(other, child);

    assert_eq!(tree.parent(child), Some(parent));
}

// ========== traversal ==========

#[test]
fn test_descendants_are_in_tree_order() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let body = element(&mut tree, html, "body");
    let header = element(&mut tree, body, "header");
    let h1 = element(&mut tree, header, "h1");
    let main = element(&mut tree, body, "main");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![html, body, header, h1, main]);
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_classes_split_on_any_whitespace() {
    let data = ElementData::new("H2").with_attr("class", "  a-heading\tcard-title ");
    assert_eq!(data.tag_name, "h2");
    assert_eq!(data.classes().collect::<Vec<_>>(), ["a-heading", "card-title"]);
    assert!(data.has_class("a-heading"));
    assert!(!data.has_class("a-head"));
}

// ========== textContent ==========

#[test]
fn test_text_content_concatenates_descendant_text() {
    let mut tree = DomTree::new();
    let h2 = element(&mut tree, NodeId::ROOT, "h2");
    let _ = tree.append_text(h2, "Breaking ");
    let em = element(&mut tree, h2, "em");
    let _ = tree.append_text(em, "news");
    let comment = tree.alloc(NodeType::Comment("ignored".to_owned()));
    tree.append_child(h2, comment);

    assert_eq!(tree.text_content(h2).as_deref(), Some("Breaking news"));
    assert_eq!(tree.text_content(NodeId::ROOT), None);
    assert_eq!(tree.text_content(NodeId(999)), None);
}

#[test]
fn test_set_text_content_replaces_children() {
    let mut tree = DomTree::new();
    let h2 = element(&mut tree, NodeId::ROOT, "h2");
    let _ = tree.append_text(h2, "Breaking ");
    let em = element(&mut tree, h2, "em");

    assert!(tree.set_text_content(h2, "Short"));

    assert_eq!(tree.children(h2).len(), 1);
    assert_eq!(tree.text_content(h2).as_deref(), Some("Short"));
    assert_eq!(tree.parent(em), None);
}

#[test]
fn test_set_text_content_reuses_single_text_child() {
    let mut tree = DomTree::new();
    let h2 = element(&mut tree, NodeId::ROOT, "h2");
    let text = tree.append_text(h2, "original");
    let before = tree.len();

    for candidate in ["a...", "ab...", "abc...", "original"] {
        assert!(tree.set_text_content(h2, candidate));
    }

    assert_eq!(tree.len(), before);
    assert_eq!(tree.children(h2), &[text]);
    assert_eq!(tree.as_text(text), Some("original"));
}

#[test]
fn test_set_text_content_empty_removes_everything() {
    let mut tree = DomTree::new();
    let h2 = element(&mut tree, NodeId::ROOT, "h2");
    let _ = tree.append_text(h2, "gone");

    assert!(tree.set_text_content(h2, ""));

    assert!(tree.children(h2).is_empty());
    assert_eq!(tree.text_content(h2).as_deref(), Some(""));
}

#[test]
fn test_set_text_content_on_document_is_rejected() {
    let mut tree = DomTree::new();
    assert!(!tree.set_text_content(NodeId::ROOT, "nope"));
    assert!(!tree.set_text_content(NodeId(42), "nope"));
}
