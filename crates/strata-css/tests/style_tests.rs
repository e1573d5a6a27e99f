//! Integration tests for CSS style types.

use strata_css::{
    ColorValue, ComputedStyle, Float, Position, Visibility, ZIndex, parse_declaration_list,
};

fn style(text: &str) -> ComputedStyle {
    let mut style = ComputedStyle::default();
    for decl in parse_declaration_list(text) {
        style.apply_declaration(&decl);
    }
    style
}

#[test]
fn test_color_from_hex_6() {
    let color = ColorValue::from_hex("#ff0000").unwrap();
    assert_eq!(
        color,
        ColorValue {
            r: 255,
            g: 0,
            b: 0,
            a: 255
        }
    );
}

#[test]
fn test_color_from_hex_3() {
    let color = ColorValue::from_hex("#f00").unwrap();
    assert_eq!(color, ColorValue::from_hex("#ff0000").unwrap());
}

#[test]
fn test_color_from_hex_8_with_zero_alpha_is_transparent() {
    let color = ColorValue::from_hex("#11223300").unwrap();
    assert!(color.is_transparent());
}

#[test]
fn test_color_rgba_function() {
    assert_eq!(
        ColorValue::parse("rgba(0, 0, 0, 0)"),
        Some(ColorValue::TRANSPARENT)
    );
    assert_eq!(
        ColorValue::parse("rgb(10 20 30 / 50%)"),
        Some(ColorValue {
            r: 10,
            g: 20,
            b: 30,
            a: 128
        })
    );
}

#[test]
fn test_color_named_transparent() {
    assert!(ColorValue::parse("Transparent").unwrap().is_transparent());
    assert!(!ColorValue::parse("white").unwrap().is_transparent());
    assert_eq!(ColorValue::parse("not-a-color"), None);
}

#[test]
fn test_initial_values() {
    let s = ComputedStyle::default();
    assert!(!s.is_positioned());
    assert!(!s.is_floating());
    assert!(!s.is_transformed());
    assert_eq!(s.opacity(), 1.0);
    assert!(s.is_visible());
    assert!(s.has_transparent_background());
}

#[test]
fn test_position_keywords() {
    assert_eq!(style("position: ABSOLUTE").position, Some(Position::Absolute));
    assert!(style("position: relative").is_positioned());
    assert!(!style("position: static").is_positioned());
    assert!(style("position: sticky").is_positioned());
}

#[test]
fn test_z_index_requires_position() {
    let s = style("z-index: 5");
    assert_eq!(s.z_index, Some(ZIndex::Integer(5)));
    assert!(!s.is_positioned_with_z_index());

    assert!(style("position: relative; z-index: -1").is_positioned_with_z_index());
    assert!(!style("position: relative; z-index: auto").is_positioned_with_z_index());
}

#[test]
fn test_float_and_transform() {
    assert_eq!(style("float: left").float, Some(Float::Left));
    assert!(style("float: right").is_floating());
    assert!(!style("float: none").is_floating());
    assert!(style("transform: rotate(45deg)").is_transformed());
    assert!(!style("transform: none").is_transformed());
}

#[test]
fn test_visibility_rules() {
    assert!(!style("display: none").is_visible());
    assert!(!style("opacity: 0").is_visible());
    assert!(!style("visibility: hidden").is_visible());
    assert_eq!(style("visibility: collapse").visibility(), Visibility::Collapse);
    assert!(style("opacity: 0.01").is_visible());
}

#[test]
fn test_unknown_properties_survive_serialization() {
    let s = style("width: 10px; content: 'x'");
    let text = s.css_text();
    assert!(text.contains("content: 'x';"));
    assert!(text.contains("width: 10px;"));
}
