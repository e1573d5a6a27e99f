//! Stacking-context trees for Strata.
//!
//! [CSS 2.1 Appendix E: Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! [`parse_node_tree`] walks a document from a root element and groups every
//! visible element into the stacking context it is painted in. A renderer
//! can then paint the returned [`StackingTree`] context by context.
//!
//! # Document mutation
//!
//! Generated content has no node of its own, so the walk materializes each
//! `::before` and `::after` as a synthetic child element and marks the
//! originating element with a class whose rule hides the native
//! pseudo-element. That rule is registered once per document through
//! [`StyleEngine::register_stylesheet`]. Nothing is ever removed.

/// Deciding whether an element establishes a context.
pub mod classify;
/// Wrapped elements and text runs.
pub mod container;
/// `content` and `url()` value parsing.
pub mod content;
/// Stacking contexts and the arena holding them.
pub mod context;
/// Errors.
pub mod error;
/// Non-blocking image requests.
pub mod image;
/// `::before`/`::after` materialization.
pub mod pseudo;
/// The document walk.
pub mod walker;

pub use classify::{classify, creates_real_stacking_context, creates_stacking_context};
pub use container::{ContainerId, NodeContainer, TextContainer};
pub use content::{PseudoContent, parse_content, strip_quotes};
pub use context::{
    ContainerSnapshot, ContextId, StackingContext, StackingContextType, StackingSnapshot,
    StackingTree,
};
pub use error::StackingError;
pub use image::{ImageKey, ImageLoader, ImageQueue};
pub use pseudo::{ensure_pseudo_hide_styles, inline_pseudo_element};
pub use walker::{IGNORED_TAGS, TreeWalker};

use strata_common::Logger;
use strata_css::StyleEngine;
use strata_dom::{DomTree, NodeId};

/// Build the stacking tree of the subtree rooted at `root`.
///
/// The root element always anchors a real context. Text that is only
/// whitespace, comments, [`IGNORED_TAGS`] and invisible elements (with their
/// subtrees) produce nothing.
///
/// The document is modified: synthetic pseudo-element nodes are inserted,
/// marker classes are appended, and the hide stylesheet is registered with
/// `engine` the first time it is seen for this document.
///
/// # Errors
///
/// Returns [`StackingError::RootNotElement`] when `root` is not an element,
/// and [`StackingError::Style`] as soon as any element's style cannot be
/// resolved. No partial tree is returned.
pub fn parse_node_tree(
    dom: &mut DomTree,
    engine: &mut dyn StyleEngine,
    images: &mut dyn ImageLoader,
    logger: &dyn Logger,
    root: NodeId,
) -> Result<StackingTree, StackingError> {
    if dom.as_element(root).is_none() {
        return Err(StackingError::RootNotElement(root));
    }

    let container = NodeContainer::new(dom, engine, images, root, None)?;
    let tree = StackingTree::new(container);
    let (root_container, root_context) = (tree.root_container(), tree.root());

    let _ = ensure_pseudo_hide_styles(dom, engine);

    logger.log("Starting node parsing");
    let mut walker = TreeWalker::new(dom, engine, images, tree);
    walker.visit(root, root_container, root_context)?;
    logger.log("Finished parsing node tree");

    Ok(walker.finish())
}
