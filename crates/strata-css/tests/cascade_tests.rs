//! Integration tests for the reference cascade.

use strata_css::{
    Cascade, ColorValue, Position, PseudoElement, SHEET_KEY_ATTRIBUTE, StyleEngine, StyleError,
    Visibility, parse_stylesheet,
};
use strata_dom::{DomTree, NodeId};

/// `<html><body><div class="card" id="main"><span></span></div></body></html>`
struct Fixture {
    tree: DomTree,
    body: NodeId,
    div: NodeId,
    span: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = DomTree::new();
    let html = tree.create_element("html");
    let body = tree.create_element("body");
    let div = tree.create_element("div");
    let span = tree.create_element("span");
    tree.set_attribute(div, "class", "card");
    tree.set_attribute(div, "id", "main");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, div);
    tree.append_child(div, span);
    Fixture {
        tree,
        body,
        div,
        span,
    }
}

fn cascade(css: &str) -> Cascade {
    let mut cascade = Cascade::new();
    cascade.add_stylesheet(&parse_stylesheet(css));
    cascade
}

#[test]
fn test_specificity_beats_source_order() {
    let f = fixture();
    let c = cascade("#main { position: absolute; } .card { position: relative; } div { position: fixed; }");
    let style = c.computed_style(&f.tree, f.div).unwrap();
    assert_eq!(style.position, Some(Position::Absolute));
}

#[test]
fn test_later_rule_wins_on_equal_specificity() {
    let f = fixture();
    let c = cascade(".card { float: left; } .card { float: right; }");
    let style = c.computed_style(&f.tree, f.div).unwrap();
    assert_eq!(style.float, Some(strata_css::Float::Right));
}

#[test]
fn test_inline_style_beats_rules_but_not_important() {
    let mut f = fixture();
    f.tree.set_attribute(f.div, "style", "opacity: 0.5; z-index: 3");
    let c = cascade("#main { opacity: 0.9; z-index: 7 !important; }");
    let style = c.computed_style(&f.tree, f.div).unwrap();
    assert_eq!(style.opacity(), 0.5);
    assert_eq!(style.z_index, Some(strata_css::ZIndex::Integer(7)));
}

#[test]
fn test_visibility_and_color_inherit() {
    let f = fixture();
    let c = cascade("body { visibility: hidden; color: red; background-color: blue; }");
    let style = c.computed_style(&f.tree, f.span).unwrap();
    assert_eq!(style.visibility(), Visibility::Hidden);
    assert_eq!(style.color, ColorValue::from_named("red"));
    assert!(style.has_transparent_background());
}

#[test]
fn test_ua_stylesheet_hides_metadata() {
    let mut f = fixture();
    let style_el = f.tree.create_element("style");
    f.tree.append_child(f.body, style_el);
    let c = Cascade::new();
    assert!(!c.computed_style(&f.tree, style_el).unwrap().is_visible());
    assert!(c.computed_style(&f.tree, f.div).unwrap().is_visible());
}

#[test]
fn test_text_nodes_have_no_style() {
    let mut f = fixture();
    let text = f.tree.create_text("hi");
    f.tree.append_child(f.div, text);
    let c = Cascade::new();
    assert_eq!(
        c.computed_style(&f.tree, text),
        Err(StyleError::NotAnElement(text))
    );
}

#[test]
fn test_pseudo_style_defaults_and_rules() {
    let f = fixture();
    let c = cascade(".card::before { content: \"X\"; } .card:after { content: url(a.png); display: block; }");

    let before = c.pseudo_style(&f.tree, f.div, PseudoElement::Before).unwrap();
    assert_eq!(before.content.as_deref(), Some("\"X\""));
    assert_eq!(before.display.as_deref(), Some("inline"));

    let after = c.pseudo_style(&f.tree, f.div, PseudoElement::After).unwrap();
    assert_eq!(after.content.as_deref(), Some("url(a.png)"));
    assert_eq!(after.display.as_deref(), Some("block"));

    let none = c.pseudo_style(&f.tree, f.span, PseudoElement::Before).unwrap();
    assert_eq!(none.content, None);
}

#[test]
fn test_pseudo_rules_do_not_leak_onto_element() {
    let f = fixture();
    let c = cascade(".card::before { position: absolute; }");
    let style = c.computed_style(&f.tree, f.div).unwrap();
    assert_eq!(style.position, None);
}

#[test]
fn test_register_stylesheet_is_idempotent() {
    let mut f = fixture();
    let mut c = Cascade::new();
    let css = ".card::before { display: none !important; }";

    assert!(c.register_stylesheet(&mut f.tree, "hide", css));
    assert!(!c.register_stylesheet(&mut f.tree, "hide", css));

    let styles: Vec<NodeId> = f
        .tree
        .children(f.body)
        .iter()
        .copied()
        .filter(|&id| f.tree.attribute(id, SHEET_KEY_ATTRIBUTE) == Some("hide"))
        .collect();
    assert_eq!(styles.len(), 1);

    let before = c.pseudo_style(&f.tree, f.div, PseudoElement::Before).unwrap();
    assert!(before.display_none);
}

#[test]
fn test_from_document_reads_style_elements_and_keys() {
    let mut f = fixture();
    let mut first = Cascade::new();
    assert!(first.register_stylesheet(&mut f.tree, "hide", ".card { float: left; }"));

    let mut second = Cascade::from_document(&f.tree);
    assert!(second.computed_style(&f.tree, f.div).unwrap().is_floating());
    assert!(!second.register_stylesheet(&mut f.tree, "hide", ".card { float: left; }"));
}

#[test]
fn test_inheritance_through_deep_nesting() {
    let mut tree = DomTree::new();
    let html = tree.create_element("html");
    tree.append_child(NodeId::ROOT, html);
    tree.set_attribute(html, "style", "color: red; visibility: hidden");
    let mut parent = html;
    for _ in 0..2000 {
        let div = tree.create_element("div");
        tree.append_child(parent, div);
        parent = div;
    }

    let style = Cascade::new().computed_style(&tree, parent).unwrap();
    assert_eq!(style.color, ColorValue::from_named("red"));
    assert_eq!(style.visibility(), Visibility::Hidden);
}
