//! User-agent stylesheet.
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents
//! elements of HTML documents in ways consistent with general user
//! expectations."
//!
//! Only the parts that change a heading's measured height are kept: hidden
//! elements, inline phrasing elements, and heading font sizes.

use std::sync::OnceLock;

use crate::cascade::{Origin, Stylesheet};

const UA_CSS: &str = r"
/* [§ 15.3.1 Hidden elements] */
area, base, basefont, datalist, head, link, meta, noembed,
noframes, param, rp, script, style, template, title {
    display: none;
}

/* [§ 15.3.4 Phrasing content] */
a, abbr, b, cite, code, em, i, small, span, strong, sub, sup, time, u {
    display: inline;
}

li {
    display: list-item;
}

/* [§ 15.3.6 Sections and headings] */
h1 { font-size: 2em; }
h2 { font-size: 1.5em; }
h3 { font-size: 1.17em; }
h5 { font-size: 0.83em; }
h6 { font-size: 0.67em; }
";

/// The parsed user-agent stylesheet, shared by every document.
pub fn ua_stylesheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(|| Stylesheet::parse(UA_CSS, Origin::UserAgent).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ua_sheet_parses_every_rule() {
        assert_eq!(ua_stylesheet().rules.len(), 8);
    }
}
