//! Keyword-valued properties that decide stacking behavior.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "The 'position' and 'float' properties determine which of the CSS 2
/// positioning algorithms is used to calculate the position of a box."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow...
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position is specified with the 'top', 'right', 'bottom',
    /// and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but in addition, the box is fixed with respect to some reference."
    Fixed,
    /// [CSS Positioned Layout 3 § 2](https://www.w3.org/TR/css-position-3/#valdef-position-sticky)
    Sticky,
}

/// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Float {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to 'left', except the box is floated to the right."
    Right,
}

/// [§ 11.2 'visibility'](https://www.w3.org/TR/CSS2/visufx.html#visibility)
///
/// "The 'visibility' property specifies whether the boxes generated by an
/// element are rendered."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// "The generated box is visible."
    #[default]
    Visible,
    /// "The generated box is invisible (fully transparent, nothing is drawn),
    /// but still affects layout."
    Hidden,
    /// "Used for dynamic row/column effects."
    Collapse,
}

/// [§ 9.9.1 Specifying the stack level: the 'z-index' property](https://www.w3.org/TR/CSS2/visuren.html#z-index)
///
/// "Values have the following meanings:
///
/// <integer>
///   This integer is the stack level of the generated box in the current
///   stacking context. The box also establishes a new stacking context.
///
/// auto
///   The stack level of the generated box in the current stacking context
///   is 0. The box does not establish a new stacking context unless it is
///   the root element."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ZIndex {
    /// "The stack level is 0. Does not establish a new stacking context."
    #[default]
    Auto,
    /// "This integer is the stack level. Establishes a new stacking context."
    Integer(i32),
}

impl ZIndex {
    /// Parse `auto` or an integer.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        value.parse().ok().map(Self::Integer)
    }
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Integer(level) => write!(f, "{level}"),
        }
    }
}
