//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// White (#ffffff)
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// [§ 6.1 transparent](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// "The keyword transparent specifies a transparent black."
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Parse any supported color syntax: hex, `rgb()`/`rgba()`, or a named color.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value);
        }
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::from_rgb_function(&lower);
        }
        Self::from_named(&lower)
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: 255 }),
            4 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: short(3)? }),
            6 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: 255 }),
            8 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: long(6)? }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// MVP: common colors from the named color table, plus `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "orange" => (255, 165, 0),
            "purple" => (128, 0, 128),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "navy" => (0, 0, 128),
            _ => return None,
        };
        Some(Self { r, g, b, a: 255 })
    }

    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// Legacy comma syntax and space syntax with an optional `/ alpha`.
    /// Alpha may be a number in `[0, 1]` or a percentage.
    fn from_rgb_function(value: &str) -> Option<Self> {
        let inner = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c == '/' || c.is_ascii_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |p: &str| -> Option<u8> {
            let v: f32 = p.parse().ok()?;
            Some(unit_to_byte(v / 255.0))
        };
        let alpha = match parts.get(3) {
            Some(p) => match p.strip_suffix('%') {
                Some(pct) => unit_to_byte(pct.parse::<f32>().ok()? / 100.0),
                None => unit_to_byte(p.parse::<f32>().ok()?),
            },
            None => 255,
        };
        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: alpha,
        })
    }

    /// [§ 4.2 transparent](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// A color with a zero alpha channel paints nothing.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Serialize as `rgba(r, g, b, alpha)` (or `rgb(...)` when opaque).
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = f32::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, round_alpha(alpha))
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round_alpha(alpha: f32) -> f32 {
    (alpha * 100.0).round() / 100.0
}
