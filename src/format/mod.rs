//! Source formatting for generated components.
//!
//! Uses oxc for TypeScript/JSX and quick-xml for Vue templates.

mod script;
mod template;

use std::fmt;
use thiserror::Error;

use crate::core::Framework;

/// Grammar the formatter parses the source with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserHint {
    TypeScript,
    Vue,
}

impl ParserHint {
    pub const fn for_framework(framework: Framework) -> Self {
        match framework {
            Framework::Vue => Self::Vue,
            Framework::React => Self::TypeScript,
        }
    }
}

impl fmt::Display for ParserHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TypeScript => "typescript",
            Self::Vue => "vue",
        })
    }
}

/// Output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatStyle {
    /// Keep statement terminators.
    pub semi: bool,
    /// Prefer `'` for string literals.
    pub single_quote: bool,
}

impl FormatStyle {
    /// Fixed style used by the pipeline.
    pub const PIPELINE: Self = Self {
        semi: false,
        single_quote: true,
    };
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self::PIPELINE
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to parse generated {hint} source: {message}")]
    Parse { hint: ParserHint, message: String },

    #[error("failed to write formatted source: {0}")]
    Io(String),
}

/// Canonicalizes generated source. Swappable so the pipeline can run against stubs.
pub trait CodeFormatter: Send + Sync {
    fn format(&self, source: &str, hint: ParserHint, style: &FormatStyle)
    -> Result<String, FormatError>;
}

/// Default formatter: oxc for scripts, quick-xml for templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceFormatter;

impl CodeFormatter for SourceFormatter {
    fn format(
        &self,
        source: &str,
        hint: ParserHint,
        style: &FormatStyle,
    ) -> Result<String, FormatError> {
        match hint {
            ParserHint::TypeScript => script::format_script(source, style),
            ParserHint::Vue => template::format_template(source),
        }
    }
}
