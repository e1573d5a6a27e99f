//! CSS parsing, selector matching, cascade, and computed styles for Strata.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules and declaration lists, `!important`
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID and universal selectors, `::before`/`::after`
//!   - Specificity calculation
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - The [`StyleEngine`] seam used by the stacking builder
//!   - [`Cascade`], a reference engine reading `<style>` elements
//! - **Computed Styles** for the properties that decide visibility and stacking
//!
//! # Not Yet Implemented
//!
//! - Combinators, attribute selectors and pseudo-classes
//! - Media queries and other at-rules
//! - Lengths; layout is out of scope

/// CSS cascade and style resolution per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Computed style representation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;
/// User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod ua_stylesheet;

pub use cascade::{Cascade, SHEET_KEY_ATTRIBUTE, StyleEngine, StyleError};
pub use parser::{CSSParser, Declaration, Stylesheet, parse_declaration_list, parse_stylesheet};
pub use selector::{ParsedSelector, PseudoElement, Specificity, parse_selector};
pub use style::{ColorValue, ComputedStyle, Float, Position, Visibility, ZIndex};
