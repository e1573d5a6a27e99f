//! Errors raised while building a stacking tree.

use strata_css::StyleError;
use strata_dom::NodeId;
use thiserror::Error;

/// Why a traversal stopped.
///
/// The walk fails fast: no partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackingError {
    /// The node handed to the entry point is not an element.
    #[error("the root node {0:?} is not an element")]
    RootNotElement(NodeId),
    /// The computed style of an element could not be resolved.
    #[error(transparent)]
    Style(#[from] StyleError),
}
