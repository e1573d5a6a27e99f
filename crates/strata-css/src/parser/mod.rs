//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! A character-level parser for style rules and declaration blocks. It is
//! enough for `<style>` elements, inline `style` attributes and the
//! serialized styles copied onto synthetic pseudo-element nodes. Strings,
//! parenthesised blocks (`url(...)`, `rgb(...)`) and comments are respected
//! when looking for `{`, `}`, `;` and `:` delimiters.

use strata_common::warning::warn_once;

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name, lowercased.
    pub name: String,
    /// The property value with `!important` removed and whitespace trimmed.
    pub value: String,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

/// A CSS selector (simplified representation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Raw selector text
    pub text: String,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selector + declarations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// The list of selectors for this rule.
    pub selectors: Vec<Selector>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet. At-rules are dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Style rules in source order.
    pub rules: Vec<StyleRule>,
}

/// Parser over the characters of a stylesheet or declaration list.
pub struct CSSParser {
    chars: Vec<char>,
    pos: usize,
}

impl CSSParser {
    /// Create a parser for `source`. Comments are removed up front.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: strip_comments(source).chars().collect(),
            pos: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();

        loop {
            let (prelude, terminator) = self.consume_until(&['{', ';']);
            let prelude = prelude.trim().to_string();
            match terminator {
                None => {
                    if !prelude.is_empty() {
                        let _ = warn_once("CSS", &format!("unterminated rule '{prelude}'"));
                    }
                    break;
                }
                // A statement at-rule such as `@import "x.css";`
                Some(';') => {
                    if !prelude.is_empty() {
                        let _ = warn_once("CSS", &format!("ignoring statement '{prelude}'"));
                    }
                }
                Some(_) => {
                    let block = self.consume_block();
                    if prelude.starts_with('@') {
                        let _ = warn_once("CSS", &format!("ignoring at-rule '{prelude}'"));
                        continue;
                    }
                    let selectors = split_top_level(&prelude, ',')
                        .into_iter()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|text| Selector {
                            text: text.to_string(),
                        })
                        .collect();
                    rules.push(StyleRule {
                        selectors,
                        declarations: parse_declarations(&block),
                    });
                }
            }
        }

        Stylesheet { rules }
    }

    /// [§ 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        let rest: String = self.chars[self.pos..].iter().collect();
        self.pos = self.chars.len();
        parse_declarations(&rest)
    }

    /// Consume characters until one of `stops` appears at the top level.
    /// Returns the consumed text and the stop character (consumed too).
    fn consume_until(&mut self, stops: &[char]) -> (String, Option<char>) {
        let mut out = String::new();
        let mut scanner = Scanner::default();
        while let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if scanner.at_top_level() && stops.contains(&c) {
                return (out, Some(c));
            }
            scanner.feed(c);
            out.push(c);
        }
        (out, None)
    }

    /// Consume a `{ ... }` body whose opening brace was already consumed.
    /// Nested blocks (inside at-rules) are kept verbatim.
    fn consume_block(&mut self) -> String {
        let mut out = String::new();
        let mut scanner = Scanner::default();
        let mut depth = 0usize;
        while let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if scanner.at_top_level() {
                match c {
                    '{' => depth += 1,
                    '}' if depth == 0 => return out,
                    '}' => depth -= 1,
                    _ => {}
                }
            }
            scanner.feed(c);
            out.push(c);
        }
        out
    }
}

/// Parse a stylesheet in one call.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    CSSParser::new(css).parse_stylesheet()
}

/// Parse the contents of a `style` attribute or declaration block.
#[must_use]
pub fn parse_declaration_list(text: &str) -> Vec<Declaration> {
    CSSParser::new(text).parse_declaration_list()
}

fn parse_declarations(block: &str) -> Vec<Declaration> {
    split_top_level(block, ';')
        .into_iter()
        .filter_map(parse_declaration)
        .collect()
}

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
fn parse_declaration(text: &str) -> Option<Declaration> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let Some((name, value)) = text.split_once(':') else {
        let _ = warn_once("CSS", &format!("dropping malformed declaration '{text}'"));
        return None;
    };
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    // "If the last two non-<whitespace-token>s in the declaration's value are a
    // <delim-token> with the value "!" followed by an <ident-token> with a value
    // that is an ASCII case-insensitive match for "important", remove them from
    // the declaration's value and set the declaration's important flag to true."
    let mut value = value.trim();
    let mut important = false;
    if let Some(bang) = value.rfind('!') {
        if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
            important = true;
            value = value[..bang].trim_end();
        }
    }

    Some(Declaration {
        name,
        value: value.to_string(),
        important,
    })
}

/// Split `text` on `sep` wherever it is not inside a string or parentheses.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut scanner = Scanner::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == sep && scanner.at_top_level() {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
            continue;
        }
        scanner.feed(c);
    }
    parts.push(&text[start..]);
    parts
}

/// Remove `/* ... */` comments that are not inside strings.
fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut scanner = Scanner::default();
    let mut chars = css.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && scanner.quote.is_none() && chars.peek() == Some(&'*') {
            let _ = chars.next();
            let mut prev = '\0';
            for inner in chars.by_ref() {
                if prev == '*' && inner == '/' {
                    break;
                }
                prev = inner;
            }
            continue;
        }
        scanner.feed(c);
        out.push(c);
    }
    out
}

/// Tracks whether the current position is inside a string or parentheses.
#[derive(Default)]
struct Scanner {
    quote: Option<char>,
    escaped: bool,
    parens: usize,
}

impl Scanner {
    const fn at_top_level(&self) -> bool {
        self.quote.is_none() && self.parens == 0
    }

    fn feed(&mut self, c: char) {
        if let Some(q) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == q {
                self.quote = None;
            }
            return;
        }
        match c {
            '"' | '\'' => self.quote = Some(c),
            '(' => self.parens += 1,
            ')' => self.parens = self.parens.saturating_sub(1),
            _ => {}
        }
    }
}
