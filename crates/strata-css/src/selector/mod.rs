//! CSS Selector parsing and matching
//!
//! This module implements compound selectors per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): type, universal,
//! class and ID selectors, optionally followed by a `::before`/`::after`
//! pseudo-element. Combinators are not supported; a selector using one is
//! rejected as a whole.

use std::fmt;

use serde::Serialize;
use strata_common::warning::warn_once;
use strata_dom::ElementData;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `div`, `p`, `body`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Examples: `.highlight`, `.btn`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Examples: `#main`, `#header`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,
}

impl SimpleSelector {
    /// Whether this simple selector matches `element`.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(tag) => element.is(tag),
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.id().is_some_and(|v| v == id),
            Self::Universal => true,
        }
    }
}

/// [CSS Pseudo-Elements § 4](https://www.w3.org/TR/css-pseudo-4/#generated-content)
///
/// "When their computed content value is not none, these pseudo-elements
/// generate boxes as if they were immediate children of their originating
/// element."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudoElement {
    /// "::before represents a styleable child pseudo-element immediately
    /// before the originating element's actual content."
    Before,
    /// "::after represents a styleable child pseudo-element immediately after
    /// the originating element's actual content."
    After,
}

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "::before",
            Self::After => "::after",
        })
    }
}

/// [§ 16 Calculating a selector's specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// "(A, B, C)": ID selectors, class selectors, type selectors and pseudo-elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A compound selector with its specificity and optional pseudo-element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The simple selectors that must all match.
    pub compound: Vec<SimpleSelector>,
    /// The pseudo-element this selector targets, if any.
    pub pseudo_element: Option<PseudoElement>,
    /// Specificity of the whole selector.
    pub specificity: Specificity,
}

impl ParsedSelector {
    /// Whether the compound part matches `element`. The pseudo-element part
    /// is checked by the caller.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        self.compound.iter().all(|s| s.matches(element))
    }
}

/// Parse a compound selector such as `div.card#main::before`.
///
/// Returns `None` (with a one-time warning) for anything outside the
/// supported grammar.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<ParsedSelector> {
    let parsed = parse_compound(raw.trim());
    if parsed.is_none() {
        let _ = warn_once("CSS", &format!("unsupported selector '{raw}'"));
    }
    parsed
}

fn parse_compound(raw: &str) -> Option<ParsedSelector> {
    if raw.is_empty() {
        return None;
    }

    let mut compound = Vec::new();
    let mut pseudo_element = None;
    let mut specificity = Specificity::default();
    let mut rest = raw;

    // A leading type or universal selector.
    if let Some(tail) = rest.strip_prefix('*') {
        compound.push(SimpleSelector::Universal);
        rest = tail;
    } else {
        let (ident, tail) = take_ident(rest);
        if !ident.is_empty() {
            compound.push(SimpleSelector::Type(ident.to_ascii_lowercase()));
            specificity.2 += 1;
            rest = tail;
        }
    }

    while !rest.is_empty() {
        if pseudo_element.is_some() {
            // "Pseudo-elements must be the last simple selector"
            return None;
        }
        if let Some(tail) = rest.strip_prefix('.') {
            let (ident, tail) = take_ident(tail);
            if ident.is_empty() {
                return None;
            }
            compound.push(SimpleSelector::Class(ident.to_string()));
            specificity.1 += 1;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('#') {
            let (ident, tail) = take_ident(tail);
            if ident.is_empty() {
                return None;
            }
            compound.push(SimpleSelector::Id(ident.to_string()));
            specificity.0 += 1;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(':') {
            // Both the CSS 2 single-colon and CSS 3 double-colon forms.
            let tail = tail.strip_prefix(':').unwrap_or(tail);
            let (ident, tail) = take_ident(tail);
            pseudo_element = Some(match ident.to_ascii_lowercase().as_str() {
                "before" => PseudoElement::Before,
                "after" => PseudoElement::After,
                _ => return None,
            });
            specificity.2 += 1;
            rest = tail;
        } else {
            return None;
        }
    }

    if compound.is_empty() {
        compound.push(SimpleSelector::Universal);
    }

    Some(ParsedSelector {
        compound,
        pseudo_element,
        specificity,
    })
}

/// [§ 4.3.11 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()))
        .map_or(input.len(), |(i, _)| i);
    input.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_double_colon_pseudo() {
        let a = parse_selector(".x:before").unwrap();
        let b = parse_selector(".x::before").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pseudo_element, Some(PseudoElement::Before));
        assert_eq!(a.specificity, Specificity(0, 1, 1));
    }

    #[test]
    fn test_bare_pseudo_is_universal() {
        let s = parse_selector("::after").unwrap();
        assert_eq!(s.compound, vec![SimpleSelector::Universal]);
    }

    #[test]
    fn test_combinators_are_rejected() {
        assert!(parse_selector("div p").is_none());
        assert!(parse_selector("div > p").is_none());
        assert!(parse_selector("a:hover").is_none());
        assert!(parse_selector("p::before.x").is_none());
    }
}
