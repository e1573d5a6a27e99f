//! Parsing of `content` and `url()` values.

/// [§ 2 'content'](https://www.w3.org/TR/css-content-3/#content-property)
///
/// What a pseudo-element's `content` value turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoContent {
    /// Literal text, quotes removed.
    Text(String),
    /// A replaced element loading the given URL.
    Image(String),
}

/// Parse a computed `content` value.
///
/// One matching pair of surrounding quotes is removed. If what remains is a
/// `url(...)` the content is an image; anything else, including a malformed
/// `url(` form, is literal text.
#[must_use]
pub fn parse_content(value: &str) -> PseudoContent {
    let content = strip_quotes(value);
    match parse_url(content) {
        Some(url) => PseudoContent::Image(strip_quotes(url).to_string()),
        None => PseudoContent::Text(content.to_string()),
    }
}

/// Remove one pair of matching `"` or `'` quotes around `content`.
///
/// A lone quote character is treated as a pair and yields an empty string.
#[must_use]
pub fn strip_quotes(content: &str) -> &str {
    let mut chars = content.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && matches!(first, '"' | '\'') => {
            &content[1..content.len() - 1]
        }
        (Some('"' | '\''), None) => "",
        _ => content,
    }
}

/// [§ 4.5 URLs](https://www.w3.org/TR/css-values-4/#urls)
///
/// The inner text of `url(...)`, if `value` is exactly one non-empty,
/// case-insensitive `url()` function.
#[must_use]
pub fn parse_url(value: &str) -> Option<&str> {
    let prefix = value.get(..4)?;
    if !prefix.eq_ignore_ascii_case("url(") {
        return None;
    }
    let inner = value[4..].strip_suffix(')')?;
    (!inner.is_empty()).then_some(inner)
}

/// Every `url()` layer of a `background-image` value, quotes removed.
#[must_use]
pub fn background_image_urls(value: &str) -> Vec<String> {
    let mut layers = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                layers.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    layers.push(&value[start..]);

    layers
        .into_iter()
        .filter_map(|layer| parse_url(layer.trim()))
        .map(|url| strip_quotes(url.trim()).to_string())
        .filter(|url| !url.is_empty())
        .collect()
}
