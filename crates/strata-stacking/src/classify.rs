//! Deciding whether an element establishes a stacking context.

use strata_dom::ElementData;

use crate::container::NodeContainer;
use crate::context::StackingContextType;

/// [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
///
/// Whether the element isolates its descendants in a context of its own:
/// the root, a positioned element with an integer `z-index`, opacity below
/// 1, a transform, or a `body` whose parent has a transparent background.
///
/// `parent` is the container of `container.parent`.
#[must_use]
pub fn creates_real_stacking_context(
    container: &NodeContainer,
    parent: Option<&NodeContainer>,
    element: &ElementData,
) -> bool {
    container.is_root()
        || container.is_positioned_with_z_index()
        || container.opacity() < 1.0
        || container.is_transformed()
        || is_body_with_transparent_root(parent, element)
}

/// Positioned or floating elements are painted as a unit even when they do
/// not isolate their descendants.
#[must_use]
pub const fn creates_stacking_context(container: &NodeContainer) -> bool {
    container.is_positioned() || container.is_floating()
}

/// Classify an element. `None` means it stays in the plain flow of the
/// current context.
#[must_use]
pub fn classify(
    container: &NodeContainer,
    parent: Option<&NodeContainer>,
    element: &ElementData,
) -> Option<StackingContextType> {
    if creates_real_stacking_context(container, parent, element) {
        Some(StackingContextType::Real)
    } else if !creates_stacking_context(container) {
        None
    } else if container.is_positioned() {
        Some(StackingContextType::PseudoPositioned)
    } else {
        Some(StackingContextType::PseudoFloat)
    }
}

// [§ 3.11.2 The Canvas Background and the HTML <body> Element](https://www.w3.org/TR/css-backgrounds-3/#body-background)
fn is_body_with_transparent_root(parent: Option<&NodeContainer>, element: &ElementData) -> bool {
    element.is("body") && parent.is_some_and(NodeContainer::has_transparent_background)
}

#[cfg(test)]
mod tests {
    use strata_css::Cascade;
    use strata_dom::{DomTree, NodeId};

    use super::*;
    use crate::container::ContainerId;
    use crate::image::ImageQueue;

    fn container(style: &str) -> (NodeContainer, ElementData) {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let div = tree.create_element("div");
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, div);
        tree.set_attribute(div, "style", style);
        let container = NodeContainer::new(
            &tree,
            &Cascade::new(),
            &mut ImageQueue::new(),
            div,
            Some(ContainerId(0)),
        )
        .unwrap();
        (container, ElementData::new("div"))
    }

    #[test]
    fn test_classification_order() {
        let cases = [
            ("", false, None),
            ("float: left", true, Some(StackingContextType::PseudoFloat)),
            ("position: relative", true, Some(StackingContextType::PseudoPositioned)),
            (
                "position: relative; float: left",
                true,
                Some(StackingContextType::PseudoPositioned),
            ),
            ("position: absolute; z-index: 0", true, Some(StackingContextType::Real)),
            ("opacity: 0.9", false, Some(StackingContextType::Real)),
            ("transform: scale(2)", false, Some(StackingContextType::Real)),
        ];
        for (style, grouping, expected) in cases {
            let (container, element) = container(style);
            assert_eq!(creates_stacking_context(&container), grouping, "{style}");
            assert_eq!(classify(&container, None, &element), expected, "{style}");
        }
    }
}
