//! CSS Value types and parsing
//!
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)

mod color;
mod keywords;

pub use color::ColorValue;
pub use keywords::{Float, Position, Visibility, ZIndex};
