//! Parser wrapper around SWC for JavaScript/TypeScript sources.
//!
//! Files are parsed with a zero-based [`StringInput`] so every AST span is a
//! direct byte offset into the stored source text. The visitor context and
//! the reference index rely on that property.

use std::ops::Range;
use std::sync::OnceLock;

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

pub fn detect_language(filename: &str) -> Language {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "jsx" => Language::Jsx,
        _ => Language::JavaScript,
    }
}

fn syntax_for(language: Language) -> Syntax {
    match language {
        Language::JavaScript => Syntax::Es(EsSyntax::default()),
        Language::Jsx => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        Language::TypeScript => Syntax::Typescript(TsSyntax::default()),
        Language::Tsx => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub span_lo: u32,
    pub span_hi: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub language: Language,
    pub line_count: usize,
    pub has_errors: bool,
}

/// One parsed source file: immutable source text plus its AST.
///
/// The AST is absent when parsing failed fatally; rules treat that as
/// "nothing to say" rather than an error.
pub struct ParsedFile {
    source: String,
    metadata: FileMetadata,
    ast_module: Option<Module>,
    errors: Vec<ParseError>,
    line_ranges: OnceLock<Vec<Range<usize>>>,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("metadata", &self.metadata)
            .field("has_module", &self.ast_module.is_some())
            .field("error_count", &self.errors.len())
            .finish()
    }
}

impl ParsedFile {
    pub fn from_source(filename: &str, source: &str) -> Self {
        let language = detect_language(filename);

        let lexer = Lexer::new(
            syntax_for(language),
            EsVersion::latest(),
            StringInput::new(source, BytePos(0), BytePos(source.len() as u32)),
            None,
        );
        let mut parser = Parser::new_from(lexer);

        let mut errors = Vec::new();
        let ast_module = match parser.parse_module() {
            Ok(module) => Some(module),
            Err(err) => {
                errors.push(to_parse_error(source, &err));
                None
            }
        };
        for err in parser.take_errors() {
            errors.push(to_parse_error(source, &err));
        }

        if !errors.is_empty() {
            tracing::debug!(file = filename, count = errors.len(), "parse errors");
        }

        let line_count = if source.is_empty() {
            0
        } else {
            source.lines().count()
        };

        let metadata = FileMetadata {
            filename: filename.to_string(),
            language,
            line_count,
            has_errors: !errors.is_empty(),
        };

        Self {
            source: source.to_string(),
            metadata,
            ast_module,
            errors,
            line_ranges: OnceLock::new(),
        }
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn module(&self) -> Option<&Module> {
        self.ast_module.as_ref()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Return the text of a 1-based line number, without its newline.
    pub fn get_line(&self, line_number: usize) -> Option<&str> {
        if line_number == 0 {
            return None;
        }

        let ranges = self.line_ranges.get_or_init(|| self.build_line_ranges());
        let index = line_number - 1;

        ranges.get(index).map(|range| &self.source[range.clone()])
    }

    fn build_line_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;

        for (i, c) in self.source.char_indices() {
            if c == '\n' {
                ranges.push(start..i);
                start = i + 1;
            }
        }

        if start < self.source.len() || (start == 0 && !self.source.is_empty()) {
            ranges.push(start..self.source.len());
        }

        ranges
    }
}

fn to_parse_error(source: &str, err: &swc_ecma_parser::error::Error) -> ParseError {
    let span = err.span();
    let (line, column) = offset_to_line_col(source, span.lo.0 as usize);
    ParseError {
        line,
        column,
        span_lo: span.lo.0,
        span_hi: span.hi.0,
        message: err.kind().msg().to_string(),
    }
}

pub(crate) fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    if source.is_empty() || offset == 0 {
        return (1, 1);
    }

    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = offset - last_newline + 1;

    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_javascript() {
        let file = ParsedFile::from_source("test.js", "const x = 1;");

        assert!(file.module().is_some());
        assert!(file.errors().is_empty());
        assert!(!file.metadata().has_errors);
    }

    #[test]
    fn parses_typescript_by_extension() {
        let file = ParsedFile::from_source("test.ts", "const x: number = 1;");

        assert_eq!(file.metadata().language, Language::TypeScript);
        assert!(file.module().is_some());
    }

    #[test]
    fn type_annotations_fail_in_plain_javascript() {
        let file = ParsedFile::from_source("test.js", "const x: number = 1;");

        assert!(file.metadata().has_errors);
    }

    #[test]
    fn broken_source_records_errors() {
        let file = ParsedFile::from_source("test.js", "const = = 1;");

        assert!(file.metadata().has_errors);
        assert!(!file.errors().is_empty());
    }

    #[test]
    fn spans_are_direct_byte_offsets() {
        use swc_ecma_ast::{Decl, Stmt};

        let source = "const x = 1;";
        let file = ParsedFile::from_source("test.js", source);
        let module = file.module().unwrap();

        let Some(swc_ecma_ast::ModuleItem::Stmt(Stmt::Decl(Decl::Var(var_decl)))) =
            module.body.first()
        else {
            panic!("expected a var declaration");
        };
        let name_span = var_decl.decls[0].name.span();

        assert_eq!(&source[name_span.lo.0 as usize..name_span.hi.0 as usize], "x");
    }

    #[test]
    fn detect_language_covers_common_extensions() {
        assert_eq!(detect_language("a.js"), Language::JavaScript);
        assert_eq!(detect_language("a.mjs"), Language::JavaScript);
        assert_eq!(detect_language("a.jsx"), Language::Jsx);
        assert_eq!(detect_language("a.ts"), Language::TypeScript);
        assert_eq!(detect_language("a.mts"), Language::TypeScript);
        assert_eq!(detect_language("a.tsx"), Language::Tsx);
    }

    #[test]
    fn get_line_returns_one_based_lines() {
        let file = ParsedFile::from_source("test.js", "const x = 1;\nconst y = 2;");

        assert_eq!(file.get_line(1), Some("const x = 1;"));
        assert_eq!(file.get_line(2), Some("const y = 2;"));
        assert_eq!(file.get_line(3), None);
        assert_eq!(file.get_line(0), None);
    }

    #[test]
    fn offset_to_line_col_second_line() {
        let source = "const x = 1;\nconst y = 2;";

        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 13), (2, 1));
        assert_eq!(offset_to_line_col(source, 19), (2, 7));
    }
}
