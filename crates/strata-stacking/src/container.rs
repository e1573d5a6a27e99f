//! Containers: visible elements and text runs with their style facts cached.

use serde::Serialize;
use strata_css::{ComputedStyle, StyleEngine};
use strata_dom::{DomTree, NodeId};

use crate::content::background_image_urls;
use crate::error::StackingError;
use crate::image::{ImageKey, ImageLoader};

/// Index of a [`NodeContainer`] in a [`StackingTree`](crate::StackingTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContainerId(pub usize);

/// An element together with its computed style.
///
/// The boolean facts are read once at construction; later changes to the
/// document do not affect them.
#[derive(Debug, Clone)]
pub struct NodeContainer {
    /// The wrapped element.
    pub node: NodeId,
    /// Container of the nearest visited ancestor element. `None` for the root.
    pub parent: Option<ContainerId>,
    /// Lowercased tag name of the element.
    pub tag_name: String,
    /// Computed style resolved at construction.
    pub style: ComputedStyle,
    /// Key of the replaced content requested for an `img` element.
    pub image: Option<ImageKey>,
    /// Keys of every `background-image` layer requested.
    pub background_images: Vec<ImageKey>,
    /// Non-whitespace text children, in document order.
    pub text_nodes: Vec<TextContainer>,
    positioned: bool,
    positioned_with_z_index: bool,
    transformed: bool,
    floating: bool,
    visible: bool,
    transparent_background: bool,
}

impl NodeContainer {
    /// Wrap `node`, resolving its computed style and requesting its images.
    ///
    /// Image requests never block: only the key returned by the loader is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`StackingError::Style`] when the engine cannot resolve the
    /// element's style.
    pub fn new(
        tree: &DomTree,
        engine: &dyn StyleEngine,
        images: &mut dyn ImageLoader,
        node: NodeId,
        parent: Option<ContainerId>,
    ) -> Result<Self, StackingError> {
        let style = engine.computed_style(tree, node)?;
        let tag_name = tree
            .as_element(node)
            .map(|element| element.tag_name.to_ascii_lowercase())
            .unwrap_or_default();

        // [§ 4.8.3](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
        let image = if tag_name == "img" {
            tree.attribute(node, "src")
                .and_then(|src| images.load_image(src))
        } else {
            None
        };
        let background_images = style
            .background_image
            .as_deref()
            .map(background_image_urls)
            .unwrap_or_default()
            .iter()
            .filter_map(|url| images.load_image(url))
            .collect();

        Ok(Self {
            node,
            parent,
            tag_name,
            positioned: style.is_positioned(),
            positioned_with_z_index: style.is_positioned_with_z_index(),
            transformed: style.is_transformed(),
            floating: style.is_floating(),
            visible: style.is_visible(),
            transparent_background: style.has_transparent_background(),
            style,
            image,
            background_images,
            text_nodes: Vec::new(),
        })
    }

    /// The root container is the one without a parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the element is painted at all.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// [§ 9.3.1](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    #[must_use]
    pub const fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Positioned with an integer `z-index`.
    #[must_use]
    pub const fn is_positioned_with_z_index(&self) -> bool {
        self.positioned_with_z_index
    }

    /// Has a `transform` other than `none`.
    #[must_use]
    pub const fn is_transformed(&self) -> bool {
        self.transformed
    }

    /// [§ 9.5](https://www.w3.org/TR/CSS2/visuren.html#floats)
    #[must_use]
    pub const fn is_floating(&self) -> bool {
        self.floating
    }

    /// Used opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.style.opacity()
    }

    /// Whether the background colour is transparent.
    #[must_use]
    pub const fn has_transparent_background(&self) -> bool {
        self.transparent_background
    }
}

/// A text node with non-whitespace content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContainer {
    /// The wrapped text node.
    pub node: NodeId,
    /// Container of the element that owns the text.
    pub parent: ContainerId,
    /// Text as found in the document, untrimmed.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use strata_css::Cascade;

    use super::*;
    use crate::image::ImageQueue;

    #[test]
    fn test_img_and_background_requests() {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        tree.append_child(NodeId::ROOT, html);
        let img = tree.create_element("IMG");
        tree.set_attribute(img, "src", "photo.jpg");
        tree.set_attribute(img, "style", "background-image: url(tile.png)");
        tree.append_child(html, img);

        let cascade = Cascade::new();
        let mut queue = ImageQueue::new();
        let container =
            NodeContainer::new(&tree, &cascade, &mut queue, img, Some(ContainerId(0))).unwrap();

        assert_eq!(container.tag_name, "img");
        assert_eq!(container.image.as_deref(), Some("photo.jpg"));
        assert_eq!(container.background_images, vec!["tile.png"]);
        assert_eq!(queue.drain(), vec!["photo.jpg", "tile.png"]);
        assert!(!container.is_root());
    }

    #[test]
    fn test_cached_facts() {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        tree.append_child(NodeId::ROOT, html);
        tree.set_attribute(
            html,
            "style",
            "position: relative; z-index: 2; opacity: 0.5; background-color: white",
        );

        let container =
            NodeContainer::new(&tree, &Cascade::new(), &mut ImageQueue::new(), html, None)
                .unwrap();
        assert!(container.is_root());
        assert!(container.is_positioned());
        assert!(container.is_positioned_with_z_index());
        assert!(!container.is_floating());
        assert!(!container.is_transformed());
        assert!(!container.has_transparent_background());
        assert!(container.is_visible());
        assert!((container.opacity() - 0.5).abs() < f32::EPSILON);
    }
}
