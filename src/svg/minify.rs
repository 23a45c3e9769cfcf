//! Structural markup cleanup with quick-xml.
//!
//! Removes what never affects rendering: the prolog, comments, editor
//! metadata, whitespace between tags, empty containers and attributes that
//! restate an SVG initial value. Element structure and geometry are kept
//! as written, so primitive shapes stay primitive.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::optimize::OptimizeError;

/// Elements dropped together with their content.
const DROPPED_ELEMENTS: &[&str] = &["metadata", "title", "desc"];

/// Editor namespaces whose elements and attributes are dropped.
const EDITOR_PREFIXES: &[&str] = &["sodipodi:", "inkscape:", "xmlns:sodipodi", "xmlns:inkscape"];

/// Elements whose content usvg cannot carry through a round trip.
const OPAQUE_ELEMENTS: &[&str] = &["text", "foreignObject"];

/// Presentation attributes and the values equal to their initial value.
const INITIAL_VALUES: &[(&str, &[&str])] = &[
    ("fill", &["#000", "#000000", "black"]),
    ("fill-opacity", &["1"]),
    ("fill-rule", &["nonzero"]),
    ("clip-rule", &["nonzero"]),
    ("stroke", &["none"]),
    ("stroke-width", &["1"]),
    ("stroke-opacity", &["1"]),
    ("stroke-linecap", &["butt"]),
    ("stroke-linejoin", &["miter"]),
    ("stroke-miterlimit", &["4"]),
    ("stroke-dasharray", &["none"]),
    ("stroke-dashoffset", &["0"]),
    ("opacity", &["1"]),
    ("visibility", &["visible"]),
];

/// What a document contains, as far as cleanup decisions go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// `<text>` or `<foreignObject>` present.
    pub has_opaque: bool,
    /// A `<style>` sheet may restyle elements, so defaults are not provably redundant.
    pub has_stylesheet: bool,
    /// Some element sets `color`, which `currentColor` resolves against.
    pub has_color_attr: bool,
}

impl Features {
    /// Scan the whole document. Also surfaces malformed markup.
    pub fn scan(svg: &str) -> Result<Self, OptimizeError> {
        let mut reader = Reader::from_str(svg);
        let mut features = Self::default();

        loop {
            match reader.read_event().map_err(markup_error)? {
                Event::Start(e) | Event::Empty(e) => {
                    let name = e.local_name();
                    let name = String::from_utf8_lossy(name.as_ref());
                    features.has_opaque |= OPAQUE_ELEMENTS.contains(&name.as_ref());
                    features.has_stylesheet |= name == "style";
                    features.has_color_attr |= e
                        .attributes()
                        .flatten()
                        .any(|attr| attr.key.as_ref() == b"color");
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(features)
    }
}

/// Re-emit `svg` without rendering-neutral markup.
pub fn clean(svg: &str) -> Result<String, OptimizeError> {
    let features = Features::scan(svg)?;
    let mut reader = Reader::from_str(svg);
    let mut out = String::with_capacity(svg.len());

    // Attributes kept on each open element, innermost last.
    let mut open: Vec<(String, Vec<(String, String)>)> = Vec::new();
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(markup_error)?;

        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                let name = qualified_name(&e);
                if is_dropped(&name) {
                    skip_depth = 1;
                    continue;
                }
                let attrs = kept_attrs(&e, &open, &features)?;
                render_start(&mut out, &name, &attrs, false);
                open.push((name, attrs));
            }
            Event::Empty(e) => {
                let name = qualified_name(&e);
                if is_dropped(&name) {
                    continue;
                }
                let attrs = kept_attrs(&e, &open, &features)?;
                if is_empty_container(&name, &attrs) {
                    continue;
                }
                render_start(&mut out, &name, &attrs, true);
            }
            Event::End(_) => {
                if let Some((name, _)) = open.pop() {
                    out.push_str("</");
                    out.push_str(&name);
                    out.push('>');
                }
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                if !raw.trim().is_empty() || inside_text(&open) {
                    out.push_str(&raw);
                }
            }
            Event::CData(data) => {
                out.push_str("<![CDATA[");
                out.push_str(&String::from_utf8_lossy(&data));
                out.push_str("]]>");
            }
            Event::GeneralRef(reference) => {
                out.push('&');
                out.push_str(&String::from_utf8_lossy(&reference));
                out.push(';');
            }
            Event::Eof => break,
            // prolog, comments and processing instructions
            _ => {}
        }
    }

    Ok(out)
}

fn markup_error(e: quick_xml::Error) -> OptimizeError {
    OptimizeError::Markup(e.to_string())
}

fn qualified_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn is_dropped(name: &str) -> bool {
    DROPPED_ELEMENTS.contains(&name) || is_editor_name(name)
}

fn is_editor_name(name: &str) -> bool {
    EDITOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

fn is_empty_container(name: &str, attrs: &[(String, String)]) -> bool {
    name == "defs" || (name == "g" && attrs.is_empty())
}

fn inside_text(open: &[(String, Vec<(String, String)>)]) -> bool {
    open.iter()
        .any(|(name, _)| matches!(name.as_str(), "text" | "tspan" | "textPath"))
}

/// Attributes worth keeping on `e`, values left escaped as written.
fn kept_attrs(
    e: &BytesStart<'_>,
    open: &[(String, Vec<(String, String)>)],
    features: &Features,
) -> Result<Vec<(String, String)>, OptimizeError> {
    let mut kept = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| OptimizeError::Markup(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();

        if is_editor_name(&key) {
            continue;
        }
        if !features.has_stylesheet && is_initial(&key, &value) && !inherited(open, &key) {
            continue;
        }
        kept.push((key, value));
    }

    Ok(kept)
}

fn is_initial(key: &str, value: &str) -> bool {
    INITIAL_VALUES.iter().any(|(name, values)| {
        *name == key && values.iter().any(|v| v.eq_ignore_ascii_case(value.trim()))
    })
}

/// Whether an ancestor sets `key` (as an attribute or inline style), which
/// makes restating the initial value meaningful.
fn inherited(open: &[(String, Vec<(String, String)>)], key: &str) -> bool {
    open.iter().flat_map(|(_, attrs)| attrs).any(|(k, v)| {
        k == key || (k == "style" && v.split(';').any(|decl| decl.split(':').next().map(str::trim) == Some(key)))
    })
}

fn render_start(out: &mut String, name: &str, attrs: &[(String, String)], empty: bool) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        let quote = if value.contains('"') { '\'' } else { '"' };
        out.push(' ');
        out.push_str(key);
        out.push('=');
        out.push(quote);
        out.push_str(value);
        out.push(quote);
    }
    out.push_str(if empty { "/>" } else { ">" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_prolog_comments_and_metadata() {
        let out = clean(
            r#"<?xml version="1.0"?><!-- x --><svg><metadata><rdf/></metadata><title>Bell</title><path d="M0 0"/></svg>"#,
        )
        .unwrap();
        assert_eq!(out, r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_drops_whitespace_between_tags() {
        let out = clean("<svg>\n  <g fill=\"red\">\n    <path d=\"M0 0\"/>\n  </g>\n</svg>").unwrap();
        assert_eq!(out, r#"<svg><g fill="red"><path d="M0 0"/></g></svg>"#);
    }

    #[test]
    fn test_drops_empty_containers() {
        let out = clean(r#"<svg><defs/><g/><path d="M0 0"/></svg>"#).unwrap();
        assert_eq!(out, r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_drops_initial_values() {
        let out = clean(r##"<svg><path d="M0 0" fill="#000000" stroke="none" stroke-width="1"/></svg>"##)
            .unwrap();
        assert_eq!(out, r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_initial_value_kept_when_overriding_parent() {
        let svg = r#"<svg stroke="currentColor"><path d="M0 0" stroke="none"/></svg>"#;
        assert_eq!(clean(svg).unwrap(), svg);

        let styled = r#"<svg style="fill: red"><path d="M0 0" fill="black"/></svg>"#;
        assert_eq!(clean(styled).unwrap(), styled);
    }

    #[test]
    fn test_stylesheet_disables_default_removal() {
        let svg = r#"<svg><style>.a{fill:red}</style><path class="a" fill="black"/></svg>"#;
        assert_eq!(clean(svg).unwrap(), svg);
    }

    #[test]
    fn test_drops_editor_namespaces() {
        let out = clean(
            r#"<svg xmlns:inkscape="i" inkscape:version="1"><sodipodi:namedview/><path d="M0 0"/></svg>"#,
        )
        .unwrap();
        assert_eq!(out, r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_keeps_text_content_and_entities() {
        let svg = r#"<svg><text x="1" y="9"><tspan>A</tspan> <tspan>&amp;B</tspan></text></svg>"#;
        assert_eq!(clean(svg).unwrap(), svg);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean("<svg>\n<!-- c --><g><path d=\"M0 0\" fill=\"black\"/></g>\n</svg>").unwrap();
        assert_eq!(clean(&once).unwrap(), once);
    }

    #[test]
    fn test_features() {
        let features = Features::scan(r#"<svg color="red"><text>A</text></svg>"#).unwrap();
        assert!(features.has_opaque);
        assert!(features.has_color_attr);
        assert!(!features.has_stylesheet);

        assert!(Features::scan("<svg><unclosed").is_err());
    }
}
