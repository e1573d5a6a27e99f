//! CSS Cascading and Style Computation
//!
//! This module defines the [`StyleEngine`] seam through which the stacking
//! builder asks for computed styles, and [`Cascade`], a reference engine that
//! implements it per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/).
//!
//! Styles are resolved on demand rather than precomputed, because the tree
//! is mutated (synthetic children, class changes) while it is being walked.

use std::collections::HashSet;

use strata_dom::{DomTree, ElementData, NodeId};
use thiserror::Error;

use crate::parser::{Declaration, Stylesheet, parse_declaration_list, parse_stylesheet};
use crate::selector::{ParsedSelector, PseudoElement, Specificity, parse_selector};
use crate::style::ComputedStyle;
use crate::ua_stylesheet::UA_STYLESHEET;

/// Attribute that marks a `<style>` element inserted through
/// [`StyleEngine::register_stylesheet`]. Its value is the registration key.
pub const SHEET_KEY_ATTRIBUTE: &str = "data-strata-sheet";

/// Failure to resolve the computed style of a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Only elements have computed styles.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// The engine could not produce a style for this element.
    #[error("cannot resolve the style of node {node:?}: {reason}")]
    Unresolvable {
        /// The element whose style was requested.
        node: NodeId,
        /// Engine-specific explanation.
        reason: String,
    },
}

/// Resolves computed styles and owns the document's stylesheet registry.
pub trait StyleEngine {
    /// [CSSOM § 9 getComputedStyle()](https://drafts.csswg.org/cssom/#dom-window-getcomputedstyle)
    ///
    /// Resolve the computed style of an element.
    ///
    /// # Errors
    ///
    /// Returns a [`StyleError`] when `node` is not an element or the engine
    /// cannot resolve it.
    fn computed_style(&self, tree: &DomTree, node: NodeId) -> Result<ComputedStyle, StyleError>;

    /// Resolve the computed style of one of an element's pseudo-elements.
    ///
    /// `None` means the style could not be resolved.
    fn pseudo_style(
        &self,
        tree: &DomTree,
        node: NodeId,
        pseudo: PseudoElement,
    ) -> Option<ComputedStyle>;

    /// Add a document-level stylesheet identified by `key`.
    ///
    /// Returns `false` without touching the document when a sheet with the
    /// same key is already registered.
    fn register_stylesheet(&mut self, tree: &mut DomTree, key: &str, css: &str) -> bool;
}

/// [§ 6.2 Cascading Origins](https://www.w3.org/TR/css-cascade-4/#cascading-origins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
}

/// A single selector of a style rule, ready for matching.
#[derive(Debug, Clone)]
struct CascadeRule {
    origin: Origin,
    selector: ParsedSelector,
    declarations: Vec<Declaration>,
    source_order: usize,
}

impl CascadeRule {
    fn sort_key(&self) -> (Origin, Specificity, usize) {
        (self.origin, self.selector.specificity, self.source_order)
    }
}

/// Reference [`StyleEngine`] backed by parsed stylesheets.
///
/// Supported: compound selectors with `::before`/`::after`, inline `style`
/// attributes, `!important`, and inheritance of `color` and `visibility`.
#[derive(Debug, Clone)]
pub struct Cascade {
    rules: Vec<CascadeRule>,
    registered: HashSet<String>,
}

impl Cascade {
    /// A cascade holding only the user-agent stylesheet.
    #[must_use]
    pub fn new() -> Self {
        let mut cascade = Self {
            rules: Vec::new(),
            registered: HashSet::new(),
        };
        cascade.push_sheet(Origin::UserAgent, &parse_stylesheet(UA_STYLESHEET));
        cascade
    }

    /// [HTML Standard § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
    ///
    /// A cascade holding the user-agent stylesheet plus every `<style>`
    /// element of `tree`, in document order. Sheets previously registered
    /// through [`StyleEngine::register_stylesheet`] are recognised by their
    /// key attribute and will not be registered twice.
    #[must_use]
    pub fn from_document(tree: &DomTree) -> Self {
        let mut cascade = Self::new();
        for id in tree.descendants(tree.root()) {
            let Some(element) = tree.as_element(id) else {
                continue;
            };
            if !element.is("style") {
                continue;
            }
            if let Some(key) = element.attrs.get(SHEET_KEY_ATTRIBUTE) {
                let _ = cascade.registered.insert(key.clone());
            }
            cascade.add_stylesheet(&parse_stylesheet(&tree.child_text_content(id)));
        }
        cascade
    }

    /// Append an author stylesheet. Later sheets win ties.
    pub fn add_stylesheet(&mut self, sheet: &Stylesheet) {
        self.push_sheet(Origin::Author, sheet);
    }

    fn push_sheet(&mut self, origin: Origin, sheet: &Stylesheet) {
        for rule in &sheet.rules {
            for selector in &rule.selectors {
                let Some(parsed) = parse_selector(&selector.text) else {
                    continue;
                };
                let source_order = self.rules.len();
                self.rules.push(CascadeRule {
                    origin,
                    selector: parsed,
                    declarations: rule.declarations.clone(),
                    source_order,
                });
            }
        }
    }

    /// Style of one element given the computed style of its parent element.
    fn cascade_element(
        &self,
        tree: &DomTree,
        node: NodeId,
        element: &ElementData,
        parent: &ComputedStyle,
    ) -> ComputedStyle {
        let mut computed = inherit_styles(parent);
        let inline = tree
            .attribute(node, "style")
            .map(parse_declaration_list)
            .unwrap_or_default();
        apply_cascaded(&mut computed, &self.matched_rules(element, None), &inline);
        computed
    }

    /// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    ///
    /// Matching rules, lowest precedence first.
    fn matched_rules(
        &self,
        element: &ElementData,
        pseudo: Option<PseudoElement>,
    ) -> Vec<&CascadeRule> {
        let mut matched: Vec<&CascadeRule> = self
            .rules
            .iter()
            .filter(|r| r.selector.pseudo_element == pseudo && r.selector.matches(element))
            .collect();
        matched.sort_by_key(|r| r.sort_key());
        matched
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleEngine for Cascade {
    fn computed_style(&self, tree: &DomTree, node: NodeId) -> Result<ComputedStyle, StyleError> {
        if tree.as_element(node).is_none() {
            return Err(StyleError::NotAnElement(node));
        }

        // [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
        //
        // Resolved from the outermost element down, one level at a time.
        let mut chain: Vec<NodeId> = tree
            .ancestors(node)
            .filter(|&id| tree.as_element(id).is_some())
            .collect();
        chain.reverse();
        chain.push(node);

        let mut computed = ComputedStyle::default();
        for id in chain {
            if let Some(element) = tree.as_element(id) {
                computed = self.cascade_element(tree, id, element, &computed);
            }
        }
        Ok(computed)
    }

    fn pseudo_style(
        &self,
        tree: &DomTree,
        node: NodeId,
        pseudo: PseudoElement,
    ) -> Option<ComputedStyle> {
        let element = tree.as_element(node)?;
        let originating = self.computed_style(tree, node).ok()?;

        // [CSS Pseudo-Elements § 4](https://www.w3.org/TR/css-pseudo-4/#generated-content)
        // "Both ::before and ::after ... are inline by default."
        let mut computed = inherit_styles(&originating);
        computed.display = Some("inline".to_string());
        apply_cascaded(&mut computed, &self.matched_rules(element, Some(pseudo)), &[]);
        Some(computed)
    }

    fn register_stylesheet(&mut self, tree: &mut DomTree, key: &str, css: &str) -> bool {
        if !self.registered.insert(key.to_string()) {
            return false;
        }

        let style = tree.create_element("style");
        tree.set_attribute(style, SHEET_KEY_ATTRIBUTE, key);
        let text = tree.create_text(css);
        tree.append_child(style, text);
        if let Some(body) = tree.body() {
            tree.append_child(body, style);
        }

        self.add_stylesheet(&parse_stylesheet(css));
        true
    }
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Normal declarations from rules, then the style attribute, then the same
/// two groups again for `!important` declarations.
fn apply_cascaded(style: &mut ComputedStyle, rules: &[&CascadeRule], inline: &[Declaration]) {
    for important in [false, true] {
        let from_rules = rules.iter().flat_map(|r| r.declarations.iter());
        for decl in from_rules.chain(inline.iter()) {
            if decl.important == important {
                style.apply_declaration(decl);
            }
        }
    }
}

/// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
/// "Some properties are inherited from an ancestor element to its descendants."
fn inherit_styles(parent: &ComputedStyle) -> ComputedStyle {
    ComputedStyle {
        // [§ 3.1 color](https://www.w3.org/TR/css-color-4/#the-color-property)
        // "Inherited: yes"
        color: parent.color.clone(),
        // [§ 11.2 visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
        // "Inherited: yes"
        visibility: parent.visibility,
        ..ComputedStyle::default()
    }
}
