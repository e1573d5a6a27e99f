//! Materializing `::before` and `::after` as real nodes.
//!
//! [CSS Pseudo-Elements § 4 Generated Content](https://www.w3.org/TR/css-pseudo-4/#generated-content)
//!
//! "When their computed content value is not none, these pseudo-elements
//! generate boxes as if they were immediate children of their originating
//! element."
//!
//! Generated content has no node in the document, so it cannot be walked.
//! Each non-empty pseudo-element is copied into a synthetic child element
//! carrying its computed style, and the originating element is marked with
//! a class whose hide rule suppresses the native pseudo-element.

use strata_css::{PseudoElement, StyleEngine};
use strata_dom::{DomTree, NodeId};

use crate::content::{PseudoContent, parse_content};

/// Marker class for elements whose `::before` has been materialized.
pub const PSEUDO_HIDE_CLASS_BEFORE: &str = "___strata___pseudoelement_before";

/// Marker class for elements whose `::after` has been materialized.
pub const PSEUDO_HIDE_CLASS_AFTER: &str = "___strata___pseudoelement_after";

/// Tag of the synthetic element holding textual content.
pub const PSEUDO_ELEMENT_TAG: &str = "strata-pseudo-element";

/// Key under which the hide rules are registered with the style engine.
pub const PSEUDO_HIDE_SHEET_KEY: &str = "strata-pseudo-hide";

const PSEUDO_HIDE_DECLARATIONS: &str = "{ content: \"\" !important; display: none !important; }";

/// The stylesheet suppressing native rendering of materialized
/// pseudo-elements.
#[must_use]
pub fn pseudo_hide_styles() -> String {
    format!(
        ".{PSEUDO_HIDE_CLASS_BEFORE}::before {PSEUDO_HIDE_DECLARATIONS}\n\
         .{PSEUDO_HIDE_CLASS_AFTER}::after {PSEUDO_HIDE_DECLARATIONS}"
    )
}

/// Register the hide rules with `engine`. Returns `false` when they were
/// already registered for this document.
pub fn ensure_pseudo_hide_styles(tree: &mut DomTree, engine: &mut dyn StyleEngine) -> bool {
    engine.register_stylesheet(tree, PSEUDO_HIDE_SHEET_KEY, &pseudo_hide_styles())
}

/// The marker class for one pseudo-element slot.
#[must_use]
pub const fn marker_class(which: PseudoElement) -> &'static str {
    match which {
        PseudoElement::Before => PSEUDO_HIDE_CLASS_BEFORE,
        PseudoElement::After => PSEUDO_HIDE_CLASS_AFTER,
    }
}

/// Insert a synthetic child for `element`'s `which` pseudo-element.
///
/// Nothing happens when the pseudo style cannot be resolved, when its
/// `content` is absent, `none`, `normal` or `-moz-alt-content`, when its
/// `display` is `none`, or when the slot was already materialized. Returns
/// the inserted node otherwise.
pub fn inline_pseudo_element(
    tree: &mut DomTree,
    engine: &dyn StyleEngine,
    element: NodeId,
    which: PseudoElement,
) -> Option<NodeId> {
    let marker = marker_class(which);
    if tree.as_element(element)?.has_class(marker) {
        return None;
    }

    let style = engine.pseudo_style(tree, element, which)?;
    let raw = style.content.as_deref()?;
    if matches!(raw, "none" | "normal" | "-moz-alt-content") || style.display_none {
        return None;
    }

    let synthetic = match parse_content(raw) {
        PseudoContent::Image(src) => {
            let img = tree.create_element("img");
            tree.set_attribute(img, "src", &src);
            img
        }
        PseudoContent::Text(text) => {
            let node = tree.create_element(PSEUDO_ELEMENT_TAG);
            let text = tree.create_text(&text);
            tree.append_child(node, text);
            node
        }
    };

    tree.set_attribute(synthetic, "style", &style.css_text());
    tree.set_attribute(
        synthetic,
        "class",
        &format!("{PSEUDO_HIDE_CLASS_BEFORE} {PSEUDO_HIDE_CLASS_AFTER}"),
    );
    if let Some(data) = tree.as_element_mut(element) {
        data.append_class(marker);
    }

    match which {
        PseudoElement::Before => tree.prepend_child(element, synthetic),
        PseudoElement::After => tree.append_child(element, synthetic),
    }
    Some(synthetic)
}
