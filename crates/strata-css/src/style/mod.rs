//! CSS Computed Style representation and value parsing
//!
//! This module implements the subset of computed values that decide
//! visibility and stacking per:
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//! - [CSS Generated Content Level 3](https://www.w3.org/TR/css-content-3/)

pub mod computed;
mod values;

pub use computed::ComputedStyle;
pub use values::{ColorValue, Float, Position, Visibility, ZIndex};
