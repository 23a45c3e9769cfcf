//! Vue template formatting with quick-xml.
//!
//! Re-emits the markup with two-space indentation. The input must be a
//! single, fully closed root element.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use super::{FormatError, ParserHint};

pub fn format_template(source: &str) -> Result<String, FormatError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| parse_error(e.to_string()))?;
        match &event {
            Event::Eof => break,
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(parse_error("text outside of the root element".to_string()));
            }
            _ => {}
        }
        writer
            .write_event(event)
            .map_err(|e| FormatError::Io(e.to_string()))?;
    }

    if depth != 0 {
        return Err(parse_error("unclosed element".to_string()));
    }
    if roots != 1 {
        return Err(parse_error(format!("expected one root element, found {roots}")));
    }

    let mut out =
        String::from_utf8(writer.into_inner()).map_err(|e| FormatError::Io(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

fn parse_error(message: String) -> FormatError {
    FormatError::Parse {
        hint: ParserHint::Vue,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indents_nested_elements() {
        let out = format_template("<template>\n  <svg v-bind=\"$attrs\"><path d=\"M0 0\"/></svg>\n</template>").unwrap();
        assert_eq!(
            out,
            "<template>\n  <svg v-bind=\"$attrs\">\n    <path d=\"M0 0\"/>\n  </svg>\n</template>\n"
        );
    }

    #[test]
    fn test_attributes_untouched() {
        let out = format_template(r#"<svg viewBox="0 0 24 24" fill="none"/>"#).unwrap();
        assert_eq!(out, "<svg viewBox=\"0 0 24 24\" fill=\"none\"/>\n");
    }

    #[test]
    fn test_unclosed_element() {
        assert!(format_template("<template><svg>").is_err());
    }

    #[test]
    fn test_mismatched_end() {
        assert!(format_template("<template><svg></g></template>").is_err());
    }

    #[test]
    fn test_multiple_roots() {
        assert!(format_template("<a/><b/>").is_err());
    }

    #[test]
    fn test_stray_text() {
        assert!(format_template("oops<template/>").is_err());
    }
}
