//! User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
//!
//! Only the rules that affect whether an element is painted at all are
//! included. Box model defaults do not influence stacking.

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
///
/// "The following elements are expected to be hidden."
pub const UA_STYLESHEET: &str = r"
area, base, basefont, datalist, head, link, meta, noembed,
noframes, param, rp, script, style, template, title {
    display: none;
}

html, body, div, p, section, article, header, footer, main, nav, ul, ol, li {
    display: block;
}

img, span, a, strong, em, b, i {
    display: inline;
}
";
