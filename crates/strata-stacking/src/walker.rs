//! The depth-first walk that assembles the stacking tree.

use strata_css::{PseudoElement, StyleEngine};
use strata_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::classify::classify;
use crate::container::{ContainerId, NodeContainer, TextContainer};
use crate::context::{ContextId, StackingTree};
use crate::error::StackingError;
use crate::image::ImageLoader;
use crate::pseudo::inline_pseudo_element;

/// Elements that are never rendered and are skipped with their subtree.
pub const IGNORED_TAGS: [&str; 6] = ["script", "head", "title", "object", "br", "option"];

/// Whether `element` is one of [`IGNORED_TAGS`], ignoring ASCII case.
#[must_use]
pub fn is_ignored(element: &ElementData) -> bool {
    IGNORED_TAGS.iter().any(|tag| element.is(tag))
}

/// Text made only of white space, including U+FEFF, produces no container.
fn is_whitespace_only(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}

/// One element whose children are still being visited.
struct Level {
    children: std::vec::IntoIter<NodeId>,
    container: ContainerId,
    context: ContextId,
}

/// Walks a document and fills a [`StackingTree`].
///
/// The walk mutates the document: pseudo-elements are materialized on each
/// element right before it is wrapped.
pub struct TreeWalker<'a> {
    dom: &'a mut DomTree,
    engine: &'a dyn StyleEngine,
    images: &'a mut dyn ImageLoader,
    tree: StackingTree,
}

impl<'a> TreeWalker<'a> {
    /// Prepare a walk that appends to `tree`.
    pub fn new(
        dom: &'a mut DomTree,
        engine: &'a dyn StyleEngine,
        images: &'a mut dyn ImageLoader,
        tree: StackingTree,
    ) -> Self {
        Self {
            dom,
            engine,
            images,
            tree,
        }
    }

    /// Visit the children of `node` in document order, then their
    /// descendants depth-first.
    ///
    /// `container` wraps `node`; `context` is the context its plain-flow
    /// descendants belong to. Pending levels are kept on an explicit stack,
    /// so nesting depth does not grow the call stack.
    ///
    /// # Errors
    ///
    /// Stops at the first element whose style cannot be resolved.
    pub fn visit(
        &mut self,
        node: NodeId,
        container: ContainerId,
        context: ContextId,
    ) -> Result<(), StackingError> {
        let mut stack = vec![self.level(node, container, context)];
        while let Some(level) = stack.last_mut() {
            let Some(child) = level.children.next() else {
                let _ = stack.pop();
                continue;
            };
            let (container, context) = (level.container, level.context);
            if let Some(next) = self.visit_child(child, container, context)? {
                stack.push(next);
            }
        }
        Ok(())
    }

    /// Children are snapshotted here, after the element's own pseudo-elements
    /// were materialized.
    fn level(&self, node: NodeId, container: ContainerId, context: ContextId) -> Level {
        Level {
            children: self.dom.children(node).to_vec().into_iter(),
            container,
            context,
        }
    }

    /// Handle one child. Returns the level to descend into, if any.
    fn visit_child(
        &mut self,
        child: NodeId,
        container: ContainerId,
        context: ContextId,
    ) -> Result<Option<Level>, StackingError> {
        let is_element = match self.dom.get(child).map(|n| &n.node_type) {
            Some(NodeType::Text(data)) => {
                if !is_whitespace_only(data) {
                    let text = TextContainer {
                        node: child,
                        parent: container,
                        text: data.clone(),
                    };
                    self.tree.push_text(text);
                }
                false
            }
            Some(NodeType::Element(element)) => !is_ignored(element),
            _ => false,
        };
        if is_element {
            self.visit_element(child, container, context)
        } else {
            Ok(None)
        }
    }

    fn visit_element(
        &mut self,
        node: NodeId,
        parent: ContainerId,
        context: ContextId,
    ) -> Result<Option<Level>, StackingError> {
        let _ = inline_pseudo_element(self.dom, self.engine, node, PseudoElement::Before);
        let _ = inline_pseudo_element(self.dom, self.engine, node, PseudoElement::After);

        let container = NodeContainer::new(self.dom, self.engine, self.images, node, Some(parent))?;
        if !container.is_visible() {
            return Ok(None);
        }

        let Some(element) = self.dom.as_element(node) else {
            return Ok(None);
        };
        let kind = classify(&container, Some(self.tree.container(parent)), element);
        let id = self.tree.push_container(container);

        let context = match kind {
            None => {
                self.tree.push_child(context, id);
                context
            }
            Some(kind) => {
                // Real and positioned contexts escape to the nearest real
                // context; floats stay where they are.
                let parent_context = if kind.bubbles() {
                    self.tree.real_parent_stacking_context(context)
                } else {
                    context
                };
                self.tree.push_context(id, parent_context, kind)
            }
        };
        Ok(Some(self.level(node, id, context)))
    }

    /// End the walk and take the tree.
    #[must_use]
    pub fn finish(self) -> StackingTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_mark_counts_as_white_space() {
        assert!(is_whitespace_only("\u{FEFF} \n\t"));
        assert!(is_whitespace_only(""));
        assert!(!is_whitespace_only("\u{FEFF}x"));
    }
}
