//! TypeScript/JSX formatting with oxc.

use oxc::allocator::Allocator;
use oxc::ast::ast::Statement;
use oxc::codegen::{Codegen, CodegenOptions};
use oxc::diagnostics::OxcDiagnostic;
use oxc::parser::Parser;
use oxc::span::{GetSpan, SourceType};

use super::{FormatError, FormatStyle, ParserHint};

/// Parse `source` as TSX and print it back in canonical form.
pub fn format_script(source: &str, style: &FormatStyle) -> Result<String, FormatError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(parse_error(&ret.errors));
    }

    let blank_before = blank_lines(source, &ret.program.body);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            single_quote: style.single_quote,
            ..CodegenOptions::default()
        })
        .build(&ret.program)
        .code;

    relayout(&code, &blank_before, style.semi)
}

/// For each top-level statement, whether the source separates it from the
/// previous one with a blank line.
fn blank_lines(source: &str, body: &[Statement<'_>]) -> Vec<bool> {
    let mut previous_end = None;
    body.iter()
        .map(|stmt| {
            let span = stmt.span();
            let blank = previous_end.is_some_and(|end: u32| {
                source
                    .get(end as usize..span.start as usize)
                    .is_some_and(|gap| gap.matches('\n').count() >= 2)
            });
            previous_end = Some(span.end);
            blank
        })
        .collect()
}

/// Restore blank lines between top-level statements and, unless `semi`,
/// drop the `;` ending each of them.
///
/// Spans come from re-parsing the printed code, so string and JSX contents
/// are never touched.
fn relayout(code: &str, blank_before: &[bool], semi: bool) -> Result<String, FormatError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::tsx()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(parse_error(&ret.errors));
    }

    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len() + blank_before.len());
    let mut last = 0;

    for (index, stmt) in ret.program.body.iter().enumerate() {
        let span = stmt.span();

        if blank_before.get(index).copied().unwrap_or(false) {
            let start = span.start as usize;
            out.push_str(&code[last..start]);
            last = start;
            if !out.ends_with("\n\n") {
                out.push('\n');
            }
        }

        if semi {
            continue;
        }

        let end = span.end as usize;
        let cut = if end > 0 && bytes.get(end - 1) == Some(&b';') {
            end - 1
        } else if bytes.get(end) == Some(&b';') {
            end
        } else {
            continue;
        };
        out.push_str(&code[last..cut]);
        last = cut + 1;
    }

    out.push_str(&code[last..]);
    Ok(out)
}

fn parse_error(errors: &[OxcDiagnostic]) -> FormatError {
    let message = errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unrecoverable syntax error".to_string());
    FormatError::Parse {
        hint: ParserHint::TypeScript,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SEMI: FormatStyle = FormatStyle::PIPELINE;

    #[test]
    fn test_single_quotes() {
        let out = format_script("import * as React from \"react\";", &NO_SEMI).unwrap();
        assert!(out.contains("from 'react'"));
        assert!(!out.contains('"'));
    }

    #[test]
    fn test_terminators_removed() {
        let out = format_script("const a = 1;\nconst b = 2;\nexport default a;", &NO_SEMI).unwrap();
        for line in out.lines() {
            assert!(!line.trim_end().ends_with(';'), "line kept terminator: {line}");
        }
        assert!(out.contains("export default a"));
    }

    #[test]
    fn test_terminators_kept_when_requested() {
        let style = FormatStyle {
            semi: true,
            single_quote: false,
        };
        let out = format_script("const a = \"x\"", &style).unwrap();
        assert!(out.contains("const a = \"x\";"));
    }

    #[test]
    fn test_semicolon_inside_jsx_kept() {
        let source = "const A = () => <svg><style>{\"a{fill:red;}\"}</style></svg>;";
        let out = format_script(source, &NO_SEMI).unwrap();
        assert!(out.contains("fill:red;"));
        assert!(!out.trim_end().ends_with(';'));
    }

    #[test]
    fn test_typed_component() {
        let source = "import type { SVGProps } from \"react\"\n\
                      const Bell = (props: SVGProps<SVGSVGElement>) => (\n  <svg {...props}><path d=\"M0 0\" /></svg>\n)\n\
                      export default Bell";
        let out = format_script(source, &NO_SEMI).unwrap();
        assert!(out.contains("const Bell = (props: SVGProps<SVGSVGElement>)"));
        assert!(out.contains("{...props}"));
        assert!(out.contains("export default Bell"));
    }

    #[test]
    fn test_blank_lines_between_statements_kept() {
        let source = "import * as React from \"react\"\n\
                      import type { SVGProps } from \"react\"\n\n\
                      const Bell = (props: SVGProps<SVGSVGElement>) => <svg {...props} />\n\n\
                      export default Bell\n";
        for style in [NO_SEMI, FormatStyle { semi: true, single_quote: true }] {
            let out = format_script(source, &style).unwrap();
            assert!(!out.contains("\n\nimport type"), "imports split: {out}");
            assert!(out.contains("\n\nconst Bell"), "no blank before component: {out}");
            assert!(out.contains("\n\nexport default Bell"), "no blank before export: {out}");
            assert!(!out.contains("\n\n\n"));
        }
    }

    #[test]
    fn test_markup_fragment() {
        let out = format_script("<svg viewBox=\"0 0 1 1\" {...props}></svg>", &NO_SEMI).unwrap();
        assert!(out.trim_start().starts_with("<svg"));
        assert!(out.contains("{...props}"));
    }

    #[test]
    fn test_syntax_error() {
        let err = format_script("const = (", &NO_SEMI).unwrap_err();
        assert!(matches!(
            err,
            FormatError::Parse {
                hint: ParserHint::TypeScript,
                ..
            }
        ));
    }
}
