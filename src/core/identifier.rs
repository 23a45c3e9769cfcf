//! Component identifier derived from a file name.
//!
//! ```text
//! "my icon!!.svg" -> "MyIcon"
//! "arrow-left"    -> "ArrowLeft"
//! "24px"          -> "Icon24px"
//! "???"           -> "Icon"
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::request::DEFAULT_FILE_NAME;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Za-z0-9]+").unwrap());

/// PascalCase identifier used to name a generated component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentifier(String);

impl ComponentIdentifier {
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = strip_svg_extension(file_name.trim());
        let ascii = deunicode::deunicode(stem);

        let name: String = WORD
            .find_iter(&ascii)
            .map(|word| capitalize(word.as_str()))
            .collect();

        match name.chars().next() {
            None => Self(DEFAULT_FILE_NAME.to_string()),
            Some(c) if c.is_ascii_digit() => Self(format!("{DEFAULT_FILE_NAME}{name}")),
            Some(_) => Self(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_svg_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".svg") => &name[..split],
        _ => name,
    }
}

/// Upper-case the first character, keep the rest verbatim.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> String {
        ComponentIdentifier::from_file_name(name).to_string()
    }

    #[test]
    fn test_words_capitalized() {
        assert_eq!(ident("my icon!!.svg"), "MyIcon");
        assert_eq!(ident("arrow-left"), "ArrowLeft");
        assert_eq!(ident("chevron_down"), "ChevronDown");
        assert_eq!(ident("Bell"), "Bell");
    }

    #[test]
    fn test_inner_case_preserved() {
        assert_eq!(ident("myIcon"), "MyIcon");
        assert_eq!(ident("HTMLLogo.SVG"), "HTMLLogo");
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(ident(""), "Icon");
        assert_eq!(ident("???"), "Icon");
        assert_eq!(ident(".svg"), "Icon");
        assert_eq!(ident("   "), "Icon");
    }

    #[test]
    fn test_leading_digit_prefixed() {
        assert_eq!(ident("24px"), "Icon24px");
        assert_eq!(ident("3d cube"), "Icon3dCube");
    }

    #[test]
    fn test_non_ascii_transliterated() {
        assert_eq!(ident("café icon"), "CafeIcon");
    }

    #[test]
    fn test_only_svg_extension_stripped() {
        assert_eq!(ident("logo.png"), "LogoPng");
        assert_eq!(ident("é"), "E");
    }
}
