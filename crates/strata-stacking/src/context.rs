//! CSS Stacking Contexts.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! "An element in CSS 2 may have a stack level, which describes its position
//! within a set of elements sharing the same stacking context."
//!
//! [CSS 2.1 Appendix E: Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Containers and contexts live in one arena, [`StackingTree`], and refer to
//! each other by index.

use serde::Serialize;
use strata_dom::{DomTree, NodeId};

use crate::container::{ContainerId, NodeContainer, TextContainer};

/// Index of a [`StackingContext`] in a [`StackingTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContextId(pub usize);

/// Why an element got its own context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackingContextType {
    /// [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
    ///
    /// "Stacking contexts can be formed by several CSS properties:
    ///
    /// - Root element of the document
    /// - Positioned elements with z-index other than 'auto'
    /// - Elements with opacity less than 1
    /// - Elements with transform ..."
    Real,
    /// A positioned element with `z-index: auto`. It is painted as if it
    /// created a context, but positioned descendants and real contexts
    /// inside it belong to the enclosing real context.
    PseudoPositioned,
    /// [§ Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
    ///
    /// "For each one of these, treat the element as if it created a new
    /// stacking context, but any positioned descendants and descendants which
    /// actually create a new stacking context should be considered part of
    /// the parent stacking context, not this new one."
    PseudoFloat,
}

impl StackingContextType {
    /// Whether a context of this kind attaches to the nearest real context
    /// rather than to the current one.
    #[must_use]
    pub const fn bubbles(self) -> bool {
        matches!(self, Self::Real | Self::PseudoPositioned)
    }

    /// Whether a context of this kind isolates its descendants.
    #[must_use]
    pub const fn is_real(self) -> bool {
        matches!(self, Self::Real)
    }
}

/// A stacking context and its direct content.
///
/// "Each box belongs to one stacking context."
#[derive(Debug, Clone)]
pub struct StackingContext {
    /// The container whose element established this context.
    pub container: ContainerId,
    /// Enclosing context. `None` only for the root.
    pub parent: Option<ContextId>,
    /// What created the context.
    pub kind: StackingContextType,
    /// Plain-flow containers, in document order.
    pub children: Vec<ContainerId>,
    /// Nested contexts, in document order.
    pub contexts: Vec<ContextId>,
}

impl StackingContext {
    /// Whether descendants are isolated inside this context.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.kind.is_real()
    }
}

/// Every container and context produced by one traversal.
///
/// Index `0` of each arena is the root.
#[derive(Debug, Clone)]
pub struct StackingTree {
    containers: Vec<NodeContainer>,
    contexts: Vec<StackingContext>,
}

impl StackingTree {
    /// Start a tree from the root container. The root context is real.
    #[must_use]
    pub fn new(root: NodeContainer) -> Self {
        Self {
            containers: vec![root],
            contexts: vec![StackingContext {
                container: ContainerId(0),
                parent: None,
                kind: StackingContextType::Real,
                children: Vec::new(),
                contexts: Vec::new(),
            }],
        }
    }

    /// The root context.
    #[must_use]
    pub const fn root(&self) -> ContextId {
        ContextId(0)
    }

    /// The root container.
    #[must_use]
    pub const fn root_container(&self) -> ContainerId {
        ContainerId(0)
    }

    /// Look up a context.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn context(&self, id: ContextId) -> &StackingContext {
        &self.contexts[id.0]
    }

    /// Look up a container.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn container(&self, id: ContainerId) -> &NodeContainer {
        &self.containers[id.0]
    }

    /// All containers, in creation order.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &NodeContainer)> {
        self.containers
            .iter()
            .enumerate()
            .map(|(i, c)| (ContainerId(i), c))
    }

    /// All contexts, in creation order.
    pub fn contexts(&self) -> impl Iterator<Item = (ContextId, &StackingContext)> {
        self.contexts
            .iter()
            .enumerate()
            .map(|(i, c)| (ContextId(i), c))
    }

    /// The container wrapping `node`, if it was visited.
    #[must_use]
    pub fn find_container(&self, node: NodeId) -> Option<ContainerId> {
        self.containers
            .iter()
            .position(|c| c.node == node)
            .map(ContainerId)
    }

    /// The context anchored on `container`, if any.
    #[must_use]
    pub fn context_of(&self, container: ContainerId) -> Option<ContextId> {
        self.contexts
            .iter()
            .position(|c| c.container == container)
            .map(ContextId)
    }

    /// Add a container without attaching it to any context.
    pub fn push_container(&mut self, container: NodeContainer) -> ContainerId {
        self.containers.push(container);
        ContainerId(self.containers.len() - 1)
    }

    /// Record a text run on its owning container.
    pub fn push_text(&mut self, text: TextContainer) {
        self.containers[text.parent.0].text_nodes.push(text);
    }

    /// Append `container` to the plain-flow children of `context`.
    pub fn push_child(&mut self, context: ContextId, container: ContainerId) {
        self.contexts[context.0].children.push(container);
    }

    /// Create an empty context anchored on `container` and nest it in
    /// `parent`.
    pub fn push_context(
        &mut self,
        container: ContainerId,
        parent: ContextId,
        kind: StackingContextType,
    ) -> ContextId {
        let id = ContextId(self.contexts.len());
        self.contexts.push(StackingContext {
            container,
            parent: Some(parent),
            kind,
            children: Vec::new(),
            contexts: Vec::new(),
        });
        self.contexts[parent.0].contexts.push(id);
        id
    }

    /// The nearest real context, starting at `id` itself and walking up.
    ///
    /// The root is real, so the search always succeeds.
    #[must_use]
    pub fn real_parent_stacking_context(&self, id: ContextId) -> ContextId {
        let mut current = id;
        loop {
            let context = &self.contexts[current.0];
            match context.parent {
                Some(parent) if !context.is_real() => current = parent,
                _ => return current,
            }
        }
    }

    /// A serializable view of the tree, rooted at the root context.
    #[must_use]
    pub fn snapshot(&self, dom: &DomTree) -> StackingSnapshot {
        self.snapshot_context(dom, self.root())
    }

    fn snapshot_context(&self, dom: &DomTree, id: ContextId) -> StackingSnapshot {
        let context = self.context(id);
        StackingSnapshot {
            anchor: self.snapshot_container(dom, context.container),
            kind: context.kind,
            is_real: context.is_real(),
            children: context
                .children
                .iter()
                .map(|&c| self.snapshot_container(dom, c))
                .collect(),
            contexts: context
                .contexts
                .iter()
                .map(|&c| self.snapshot_context(dom, c))
                .collect(),
        }
    }

    fn snapshot_container(&self, dom: &DomTree, id: ContainerId) -> ContainerSnapshot {
        let container = self.container(id);
        ContainerSnapshot {
            tag: container.tag_name.clone(),
            id: dom
                .as_element(container.node)
                .and_then(|element| element.id().cloned()),
            text: container.text_nodes.iter().map(|t| t.text.clone()).collect(),
        }
    }
}

/// Debug view of one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerSnapshot {
    /// Lowercased tag name.
    pub tag: String,
    /// The element's `id` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Text runs owned by the container.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
}

/// Debug view of one context and everything nested in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackingSnapshot {
    /// The container that established the context.
    pub anchor: ContainerSnapshot,
    /// What created the context.
    pub kind: StackingContextType,
    /// Whether the context is real.
    pub is_real: bool,
    /// Plain-flow children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContainerSnapshot>,
    /// Nested contexts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<StackingSnapshot>,
}

impl StackingSnapshot {
    /// Render as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
