//! Visitor context providing file information during AST traversal.

use swc_common::Span;

use crate::parser::{ParsedFile, offset_to_line_col};

pub struct VisitorContext<'a> {
    file: &'a ParsedFile,
}

impl<'a> VisitorContext<'a> {
    pub fn new(file: &'a ParsedFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &ParsedFile {
        self.file
    }

    pub fn span_to_location(&self, span: Span) -> (usize, usize) {
        offset_to_line_col(self.file.source(), span.lo.0 as usize)
    }

    pub fn span_to_range(&self, span: Span) -> (usize, usize, usize, usize) {
        let (line, column) = offset_to_line_col(self.file.source(), span.lo.0 as usize);
        let (end_line, end_column) = offset_to_line_col(self.file.source(), span.hi.0 as usize);
        (line, column, end_line, end_column)
    }

    pub fn get_source_text(&self, span: Span) -> Option<&str> {
        let source = self.file.source();
        let lo = span.lo.0 as usize;
        let hi = span.hi.0 as usize;

        if lo <= hi && hi <= source.len() {
            Some(&source[lo..hi])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::BytePos;

    #[test]
    fn context_provides_file_reference() {
        let parsed = ParsedFile::from_source("test.js", "const x = 1;");
        let ctx = VisitorContext::new(&parsed);

        assert_eq!(ctx.file().metadata().filename, "test.js");
    }

    #[test]
    fn span_to_location_returns_line_and_column() {
        let code = "const x = 1;\nconst y = 2;";
        let parsed = ParsedFile::from_source("test.js", code);
        let ctx = VisitorContext::new(&parsed);

        let (line, col) = ctx.span_to_location(Span::new(BytePos(0), BytePos(5)));

        assert_eq!(line, 1);
        assert_eq!(col, 1);
    }

    #[test]
    fn span_to_range_spans_lines() {
        let code = "const x = 1;\nconst y = 2;";
        let parsed = ParsedFile::from_source("test.js", code);
        let ctx = VisitorContext::new(&parsed);

        let (line, col, end_line, end_col) =
            ctx.span_to_range(Span::new(BytePos(6), BytePos(19)));

        assert_eq!((line, col), (1, 7));
        assert_eq!((end_line, end_col), (2, 7));
    }

    #[test]
    fn get_source_text_returns_span_content() {
        let code = "const x = 1;";
        let parsed = ParsedFile::from_source("test.js", code);
        let ctx = VisitorContext::new(&parsed);

        let text = ctx.get_source_text(Span::new(BytePos(6), BytePos(7)));

        assert_eq!(text, Some("x"));
    }

    #[test]
    fn get_source_text_rejects_out_of_bounds_span() {
        let parsed = ParsedFile::from_source("test.js", "x");
        let ctx = VisitorContext::new(&parsed);

        assert_eq!(ctx.get_source_text(Span::new(BytePos(0), BytePos(99))), None);
    }
}
