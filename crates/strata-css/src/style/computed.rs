//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use strata_common::warning::warn_once;

use super::values::{ColorValue, Float, Position, Visibility, ZIndex};
use crate::parser::Declaration;

/// Computed styles for an element or pseudo-element.
///
/// Only the properties that decide visibility and stacking are interpreted.
/// Every other declaration is kept verbatim in `other` so the style can be
/// serialized again with [`ComputedStyle::css_text`].
///
/// All values are `Option` - `None` means "not set" (use the initial value).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// Lowercased keyword(s). `None` means the element's default.
    pub display: Option<String>,

    /// [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
    ///
    /// "The element and its descendants generate no boxes or text runs."
    pub display_none: bool,

    /// [§ 11.2 'visibility'](https://www.w3.org/TR/CSS2/visufx.html#visibility)
    ///
    /// Inherited: yes
    pub visibility: Option<Visibility>,

    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    ///
    /// Inherited: yes
    pub color: Option<ColorValue>,

    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    pub background_color: Option<ColorValue>,

    /// [§ 3.3 'background-image'](https://www.w3.org/TR/css-backgrounds-3/#background-image)
    ///
    /// Raw value, e.g. `url("tile.png")`.
    pub background_image: Option<String>,

    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    pub position: Option<Position>,

    /// [§ 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
    pub z_index: Option<ZIndex>,

    /// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    pub float: Option<Float>,

    /// [§ 3.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency)
    ///
    /// Clamped to `[0, 1]`.
    pub opacity: Option<f32>,

    /// [§ 6 'transform'](https://www.w3.org/TR/css-transforms-1/#transform-property)
    ///
    /// `None` when unset or `none`; otherwise the raw transform list.
    pub transform: Option<String>,

    /// [§ 2 'content'](https://www.w3.org/TR/css-content-3/#content-property)
    ///
    /// The raw value as written, quotes included (`"X"`, `url(a.png)`, `none`).
    pub content: Option<String>,

    /// Declarations this type does not interpret, by property name.
    pub other: BTreeMap<String, String>,
}

impl ComputedStyle {
    /// Apply a CSS declaration to update this computed style.
    pub fn apply_declaration(&mut self, decl: &Declaration) {
        let value = decl.value.trim();
        match decl.name.as_str() {
            // [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
            "display" => {
                let keyword = value.to_ascii_lowercase();
                self.display_none = keyword == "none";
                self.display = Some(keyword);
            }
            "visibility" => match value.parse() {
                Ok(v) => self.visibility = Some(v),
                Err(_) => warn_value("visibility", value),
            },
            "color" => match ColorValue::parse(value) {
                Some(c) => self.color = Some(c),
                None => warn_value("color", value),
            },
            "background-color" => match ColorValue::parse(value) {
                Some(c) => self.background_color = Some(c),
                None => warn_value("background-color", value),
            },
            "background-image" => {
                self.background_image = (!value.eq_ignore_ascii_case("none")).then(|| value.to_string());
            }
            // [§ 3.10 'background'](https://www.w3.org/TR/css-backgrounds-3/#background)
            //
            // Only the color and image layers matter here.
            "background" => self.apply_background_shorthand(value),
            "position" => match value.parse() {
                Ok(p) => self.position = Some(p),
                Err(_) => warn_value("position", value),
            },
            "z-index" => match ZIndex::parse(value) {
                Some(z) => self.z_index = Some(z),
                None => warn_value("z-index", value),
            },
            "float" => match value.parse() {
                Ok(f) => self.float = Some(f),
                Err(_) => warn_value("float", value),
            },
            "opacity" => match parse_opacity(value) {
                Some(o) => self.opacity = Some(o),
                None => warn_value("opacity", value),
            },
            "transform" => {
                self.transform = (!value.eq_ignore_ascii_case("none")).then(|| value.to_string());
            }
            "content" => self.content = Some(value.to_string()),
            name => {
                let _ = self.other.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn apply_background_shorthand(&mut self, value: &str) {
        if value.eq_ignore_ascii_case("none") {
            self.background_color = Some(ColorValue::TRANSPARENT);
            self.background_image = None;
            return;
        }
        let mut color = None;
        let mut image = None;
        for part in split_whitespace_outside_parens(value) {
            if part.to_ascii_lowercase().starts_with("url(") {
                image = Some(part.to_string());
            } else if let Some(c) = ColorValue::parse(part) {
                color = Some(c);
            }
        }
        // "The shorthand resets all sub-properties it does not set to their initial value."
        self.background_color = Some(color.unwrap_or(ColorValue::TRANSPARENT));
        self.background_image = image;
    }

    /// [§ 9.3.1](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    ///
    /// "An element is said to be positioned if its 'position' property has a
    /// value other than 'static'."
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.position.unwrap_or_default() != Position::Static
    }

    /// A positioned element whose `z-index` is an integer.
    #[must_use]
    pub fn is_positioned_with_z_index(&self) -> bool {
        self.is_positioned() && matches!(self.z_index, Some(ZIndex::Integer(_)))
    }

    /// Whether `float` is `left` or `right`.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.float.unwrap_or_default() != Float::None
    }

    /// Whether a `transform` other than `none` is set.
    #[must_use]
    pub const fn is_transformed(&self) -> bool {
        self.transform.is_some()
    }

    /// Used opacity; the initial value is 1.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Used visibility; the initial value is `visible`.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or_default()
    }

    /// An element is painted at all when it generates boxes, is not fully
    /// transparent, and its visibility is `visible`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.display_none && self.opacity() > 0.0 && self.visibility() == Visibility::Visible
    }

    /// [§ 3.2](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    ///
    /// "Initial: transparent"
    #[must_use]
    pub fn has_transparent_background(&self) -> bool {
        self.background_color
            .as_ref()
            .is_none_or(ColorValue::is_transparent)
    }

    /// [CSSOM § 6.6 cssText](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// Serialize every set property as a declaration block suitable for a
    /// `style` attribute. Properties are written in a fixed order.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut decls: Vec<(&str, String)> = Vec::new();
        if let Some(display) = &self.display {
            decls.push(("display", display.clone()));
        }
        if let Some(v) = self.visibility {
            decls.push(("visibility", v.to_string()));
        }
        if let Some(c) = &self.color {
            decls.push(("color", c.to_css()));
        }
        if let Some(c) = &self.background_color {
            decls.push(("background-color", c.to_css()));
        }
        if let Some(image) = &self.background_image {
            decls.push(("background-image", image.clone()));
        }
        if let Some(p) = self.position {
            decls.push(("position", p.to_string()));
        }
        if let Some(z) = self.z_index {
            decls.push(("z-index", z.to_string()));
        }
        if let Some(f) = self.float {
            decls.push(("float", f.to_string()));
        }
        if let Some(o) = self.opacity {
            decls.push(("opacity", o.to_string()));
        }
        if let Some(t) = &self.transform {
            decls.push(("transform", t.clone()));
        }
        if let Some(content) = &self.content {
            decls.push(("content", content.clone()));
        }

        let mut text = String::new();
        let all = decls
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .chain(self.other.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        for (name, value) in all {
            if !text.is_empty() {
                text.push(' ');
            }
            let _ = write!(text, "{name}: {value};");
        }
        text
    }
}

fn parse_opacity(value: &str) -> Option<f32> {
    let parsed = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => value.parse::<f32>().ok()?,
    };
    parsed.is_finite().then(|| parsed.clamp(0.0, 1.0))
}

fn split_whitespace_outside_parens(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_ascii_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push(&value[s..]);
    }
    parts
}

fn warn_value(property: &str, value: &str) {
    let _ = warn_once("CSS", &format!("unsupported {property} value '{value}'"));
}
