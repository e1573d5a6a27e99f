//! Integration tests for `::before`/`::after` materialization.

use serde_json::json;
use strata_common::NullLogger;
use strata_css::{Cascade, PseudoElement, SHEET_KEY_ATTRIBUTE, StyleEngine};
use strata_dom::{DomTree, NodeId};
use strata_stacking::pseudo::{
    PSEUDO_ELEMENT_TAG, PSEUDO_HIDE_CLASS_AFTER, PSEUDO_HIDE_CLASS_BEFORE, PSEUDO_HIDE_SHEET_KEY,
};
use strata_stacking::{ImageQueue, StackingContextType, StackingTree, parse_node_tree};

/// `<html><head><style>{css}</style></head><body><div class="note">body</div></body></html>`
struct Doc {
    tree: DomTree,
    html: NodeId,
    body: NodeId,
    note: NodeId,
}

fn doc(css: &str) -> Doc {
    let mut tree = DomTree::new();
    let html = tree.create_element("html");
    let head = tree.create_element("head");
    let style = tree.create_element("style");
    let sheet = tree.create_text(css);
    let body = tree.create_element("body");
    let note = tree.create_element("div");
    let content = tree.create_text("body");
    tree.set_attribute(note, "class", "note");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(head, style);
    tree.append_child(style, sheet);
    tree.append_child(html, body);
    tree.append_child(body, note);
    tree.append_child(note, content);
    Doc {
        tree,
        html,
        body,
        note,
    }
}

fn build(doc: &mut Doc, cascade: &mut Cascade, images: &mut ImageQueue) -> StackingTree {
    parse_node_tree(&mut doc.tree, cascade, images, &NullLogger, doc.html).unwrap()
}

fn hide_sheets(tree: &DomTree, body: NodeId) -> usize {
    tree.children(body)
        .iter()
        .filter(|&&id| tree.attribute(id, SHEET_KEY_ATTRIBUTE) == Some(PSEUDO_HIDE_SHEET_KEY))
        .count()
}

const TEXT_CSS: &str =
    ".note::before { content: \"A\"; color: red; } .note::after { content: 'Z'; }";

#[test]
fn test_text_content_becomes_synthetic_children() {
    let mut d = doc(TEXT_CSS);
    let mut cascade = Cascade::from_document(&d.tree);
    let tree = build(&mut d, &mut cascade, &mut ImageQueue::new());

    let children = d.tree.children(d.note).to_vec();
    assert_eq!(children.len(), 3);
    let (before, after) = (children[0], children[2]);

    for synthetic in [before, after] {
        let element = d.tree.as_element(synthetic).unwrap();
        assert!(element.is(PSEUDO_ELEMENT_TAG));
        assert_eq!(
            d.tree.attribute(synthetic, "class"),
            Some(format!("{PSEUDO_HIDE_CLASS_BEFORE} {PSEUDO_HIDE_CLASS_AFTER}").as_str())
        );
    }
    assert_eq!(d.tree.child_text_content(before), "A");
    assert_eq!(d.tree.child_text_content(after), "Z");
    assert_eq!(
        d.tree.attribute(before, "style"),
        Some("display: inline; color: rgb(255, 0, 0); content: \"A\";")
    );
    assert_eq!(
        d.tree.attribute(d.note, "class"),
        Some(format!("note {PSEUDO_HIDE_CLASS_BEFORE} {PSEUDO_HIDE_CLASS_AFTER}").as_str())
    );

    // Synthetic nodes are visited like authored ones, ::before first.
    let body_context = tree
        .context_of(tree.find_container(d.body).unwrap())
        .unwrap();
    let snapshot = serde_json::to_value(tree.snapshot(&d.tree)).unwrap();
    assert_eq!(
        snapshot["contexts"][0]["children"],
        json!([
            { "tag": "div", "text": ["body"] },
            { "tag": PSEUDO_ELEMENT_TAG, "text": ["A"] },
            { "tag": PSEUDO_ELEMENT_TAG, "text": ["Z"] }
        ])
    );
    assert_eq!(tree.context(body_context).children.len(), 3);
}

#[test]
fn test_native_pseudo_elements_are_hidden_afterwards() {
    let mut d = doc(TEXT_CSS);
    let mut cascade = Cascade::from_document(&d.tree);
    let _ = build(&mut d, &mut cascade, &mut ImageQueue::new());

    for pseudo in [PseudoElement::Before, PseudoElement::After] {
        let style = cascade.pseudo_style(&d.tree, d.note, pseudo).unwrap();
        assert!(style.display_none);
        assert_eq!(style.content.as_deref(), Some("\"\""));
    }
    assert_eq!(hide_sheets(&d.tree, d.body), 1);
}

#[test]
fn test_url_content_becomes_an_image() {
    let mut d = doc(".note::before { content: url(\"star.png\"); }");
    let mut cascade = Cascade::from_document(&d.tree);
    let mut images = ImageQueue::new();
    let tree = build(&mut d, &mut cascade, &mut images);

    let img = d.tree.first_child(d.note).unwrap();
    assert!(d.tree.as_element(img).unwrap().is("img"));
    assert_eq!(d.tree.attribute(img, "src"), Some("star.png"));
    assert_eq!(images.pending(), ["star.png"]);

    let container = tree.container(tree.find_container(img).unwrap());
    assert_eq!(container.image.as_deref(), Some("star.png"));
    assert!(container.text_nodes.is_empty());
}

#[test]
fn test_malformed_url_is_text() {
    let mut d = doc(".note::after { content: \"url()\"; }");
    let mut cascade = Cascade::from_document(&d.tree);
    let mut images = ImageQueue::new();
    let _ = build(&mut d, &mut cascade, &mut images);

    let synthetic = d.tree.last_child(d.note).unwrap();
    assert!(d.tree.as_element(synthetic).unwrap().is(PSEUDO_ELEMENT_TAG));
    assert_eq!(d.tree.child_text_content(synthetic), "url()");
    assert!(images.pending().is_empty());
}

#[test]
fn test_running_twice_changes_nothing() {
    let mut d = doc(TEXT_CSS);
    let mut cascade = Cascade::from_document(&d.tree);
    let mut images = ImageQueue::new();

    let first = build(&mut d, &mut cascade, &mut images);
    let first_snapshot = first.snapshot(&d.tree);
    let nodes = d.tree.len();
    let class = d.tree.attribute(d.note, "class").map(str::to_string);

    let second = build(&mut d, &mut cascade, &mut images);
    assert_eq!(second.snapshot(&d.tree), first_snapshot);
    assert_eq!(d.tree.len(), nodes);
    assert_eq!(d.tree.attribute(d.note, "class").map(str::to_string), class);
    assert_eq!(hide_sheets(&d.tree, d.body), 1);
}

#[test]
fn test_fresh_engine_recognises_injected_sheet() {
    let mut d = doc(TEXT_CSS);
    let mut first = Cascade::from_document(&d.tree);
    let _ = build(&mut d, &mut first, &mut ImageQueue::new());
    let nodes = d.tree.len();

    let mut second = Cascade::from_document(&d.tree);
    let _ = build(&mut d, &mut second, &mut ImageQueue::new());
    assert_eq!(d.tree.len(), nodes);
    assert_eq!(hide_sheets(&d.tree, d.body), 1);
}

#[test]
fn test_document_without_body_gets_no_sheet() {
    let mut tree = DomTree::new();
    let html = tree.create_element("html");
    tree.append_child(NodeId::ROOT, html);

    let _ = parse_node_tree(
        &mut tree,
        &mut Cascade::new(),
        &mut ImageQueue::new(),
        &NullLogger,
        html,
    )
    .unwrap();
    assert!(tree.children(html).is_empty());
}

#[test]
fn test_styled_pseudo_elements_get_their_own_contexts() {
    let mut d = doc(
        ".note::before { content: \"X\"; position: absolute; } \
         .note::after { content: \"Y\"; opacity: 0.5; }",
    );
    let mut cascade = Cascade::from_document(&d.tree);
    let tree = build(&mut d, &mut cascade, &mut ImageQueue::new());

    let children = d.tree.children(d.note).to_vec();
    let (before, after) = (children[0], children[children.len() - 1]);
    let body_context = tree
        .context_of(tree.find_container(d.body).unwrap())
        .unwrap();

    let before_context = tree
        .context_of(tree.find_container(before).unwrap())
        .unwrap();
    assert_eq!(
        tree.context(before_context).kind,
        StackingContextType::PseudoPositioned
    );
    assert_eq!(tree.context(before_context).parent, Some(body_context));

    let after_context = tree
        .context_of(tree.find_container(after).unwrap())
        .unwrap();
    assert!(tree.context(after_context).is_real());
    assert_eq!(tree.context(after_context).parent, Some(body_context));

    assert_eq!(
        tree.context(body_context).contexts,
        vec![before_context, after_context]
    );
}
