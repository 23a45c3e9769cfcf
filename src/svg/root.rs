//! Structural access to the root `<svg>` start tag.
//!
//! Locates the tag with `quick-xml` instead of a pattern match, so a `>`
//! inside a quoted attribute value cannot end the tag early.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A located `<svg>` start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgTag {
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
    /// `<svg ... />`
    pub self_closing: bool,
    /// Attributes in source order, values kept escaped as written.
    pub attrs: Vec<(String, String)>,
}

/// Where scanning stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The document's first element must be `<svg>`.
    Root,
    /// The first `<svg>` start tag anywhere in the markup.
    FirstMatch,
}

impl SvgTag {
    /// Find the `<svg>` start tag within `doc`.
    ///
    /// Returns `Ok(None)` when no matching tag exists in `scope`.
    pub fn find(doc: &str, scope: Scope) -> Result<Option<Self>, String> {
        let mut reader = Reader::from_str(doc);

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| e.to_string())?;
            let (element, self_closing) = match event {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::Eof => return Ok(None),
                _ => continue,
            };

            if element.local_name().as_ref() == b"svg" {
                let end = reader.buffer_position() as usize;
                let attrs = collect_attrs(&element)?;
                return Ok(Some(Self {
                    start,
                    end,
                    self_closing,
                    attrs,
                }));
            }

            if scope == Scope::Root {
                return Ok(None);
            }
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(index).1)
    }

    /// Set `key`, replacing an existing value in place or appending.
    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((key.to_string(), value.to_string())),
        }
    }

    /// Serialize the tag back to markup.
    pub fn render(&self) -> String {
        let mut out = String::from("<svg");
        for (key, value) in &self.attrs {
            let quote = if value.contains('"') { '\'' } else { '"' };
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push(quote);
            out.push_str(value);
            out.push(quote);
        }
        out.push_str(if self.self_closing { "/>" } else { ">" });
        out
    }

    /// Offset where a new attribute can be inserted: before `>` or `/>`.
    pub fn insertion_point(&self) -> usize {
        if self.self_closing {
            self.end - 2
        } else {
            self.end - 1
        }
    }
}

fn collect_attrs(element: &BytesStart<'_>) -> Result<Vec<(String, String)>, String> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            Ok((key, value))
        })
        .collect()
}

/// Insert `attribute` into the first `<svg>` start tag, leaving every other
/// byte untouched. Markup without such a tag is returned unchanged.
pub fn splice_attribute(doc: &str, attribute: &str) -> String {
    let Ok(Some(tag)) = SvgTag::find(doc, Scope::FirstMatch) else {
        return doc.to_string();
    };

    let at = tag.insertion_point();
    let head = doc[..at].trim_end();
    format!("{head} {attribute}{}", &doc[at..])
}
