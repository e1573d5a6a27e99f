//! Image requests issued while containers are built.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! The walk never waits for an image. It hands each URL to an
//! [`ImageLoader`] and keeps the returned key; fetching and decoding happen
//! later, in whatever phase drains the loader.

use std::collections::HashSet;

/// Key under which a requested image will become available.
pub type ImageKey = String;

/// Accepts image URLs without blocking.
pub trait ImageLoader {
    /// Start loading `src`. Returns the key the image will be stored under,
    /// or `None` if the URL cannot be loaded at all.
    fn load_image(&mut self, src: &str) -> Option<ImageKey>;
}

/// Records image requests, de-duplicated, in first-request order.
#[derive(Debug, Default, Clone)]
pub struct ImageQueue {
    pending: Vec<ImageKey>,
    seen: HashSet<ImageKey>,
}

impl ImageQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[ImageKey] {
        &self.pending
    }

    /// Take every pending request. Keys already seen are still remembered,
    /// so requesting them again does not queue them twice.
    pub fn drain(&mut self) -> Vec<ImageKey> {
        std::mem::take(&mut self.pending)
    }
}

impl ImageLoader for ImageQueue {
    fn load_image(&mut self, src: &str) -> Option<ImageKey> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }
        let key = src.to_string();
        if self.seen.insert(key.clone()) {
            self.pending.push(key.clone());
        }
        Some(key)
    }
}
