//! prefer-for-of rule (M001): index-based `for` loops that only use their
//! index to access one array should be `for...of` loops.
//!
//! The check has two halves. The locator finds the `arr.length` property
//! access that bounds the loop, either in the condition (`i < arr.length`) or
//! in a cached-length initializer (`var i = 0, len = arr.length`). The
//! analyzer then counts how often the index variable is used inside the body
//! and how many of those uses are literal `arr[i]` accesses; when every
//! body-local use is an element access, the index has no independent purpose
//! and the loop is flagged.
//!
//! The `arr[i]` count is deliberately textual (a regex over the body source),
//! not structural: the decision rule is calibrated against it, including its
//! conservative miss on shapes like `arr[i + 1]`.

use std::ops::ControlFlow;

use regex::Regex;
use swc_common::Spanned;
use swc_ecma_ast::{Expr, ForStmt, MemberExpr, MemberProp, VarDeclOrExpr};

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::parser::ParsedFile;
use crate::references::ReferenceIndex;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::visitor::{AstVisitor, VisitorContext, walk_ast};

const MESSAGE: &str =
    "expected an iteration-over-elements loop instead of this index-based loop with simple iteration";

/// The array-like member name that marks a counted loop as iterating a
/// collection. Case-sensitive, exact.
const LENGTH_PROPERTY: &str = "length";

/// Canonical number of index-variable occurrences in the loop header
/// (initializer, condition, increment). Subtracted from the total reference
/// count to approximate body-local uses. A structural approximation: headers
/// with a missing initializer or compound increments are mis-scored, which is
/// an accepted imprecision of the heuristic.
const HEADER_INDEX_USAGES: isize = 3;

declare_rule!(
    PreferForOf,
    id = "M001",
    name = "prefer-for-of",
    description = "Recommends a for-of loop over a standard for loop when the index is only used to access the array being iterated",
    severity = Warning,
    examples = "// Bad\nfor (var i = 0; i < arr.length; i++) {\n    use(arr[i]);\n}\n\n// Good\nfor (const item of arr) {\n    use(item);\n}"
);

impl Rule for PreferForOf {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let ctx = VisitorContext::new(file);
        let references = ReferenceIndex::build(file);
        let mut visitor = PreferForOfVisitor {
            diagnostics: Vec::new(),
            file_path: file.metadata().filename.clone(),
            ctx: &ctx,
            references: &references,
        };

        walk_ast(module, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct PreferForOfVisitor<'a> {
    diagnostics: Vec<Diagnostic>,
    file_path: String,
    ctx: &'a VisitorContext<'a>,
    references: &'a ReferenceIndex,
}

impl AstVisitor for PreferForOfVisitor<'_> {
    fn visit_for_stmt(&mut self, node: &ForStmt, _ctx: &VisitorContext) -> ControlFlow<()> {
        if let Some(site) = locate_array_access(node) {
            if let Some(diagnostic) = self.analyze(node, site) {
                self.diagnostics.push(diagnostic);
            }
        }
        ControlFlow::Continue(())
    }
}

/// Find the property-access expression bounding the loop, if any.
///
/// Primary shape: the right operand of the condition's comparison
/// (`i < arr.length`). Fallback shape: the first declarator in the
/// initializer whose initializing expression is a property access
/// (`var i = 0, len = arr.length`). Purely structural; whether the accessed
/// property is actually `length` is the analyzer's concern.
fn locate_array_access(for_stmt: &ForStmt) -> Option<&MemberExpr> {
    // Oddly formatted but valid loops may omit any header clause.
    let test = for_stmt.test.as_deref()?;

    if let Expr::Bin(bin) = test {
        if let Expr::Member(member) = &*bin.right {
            return Some(member);
        }
    }

    if let Some(VarDeclOrExpr::VarDecl(var_decl)) = &for_stmt.init {
        for declarator in &var_decl.decls {
            if let Some(Expr::Member(member)) = declarator.init.as_deref() {
                return Some(member);
            }
        }
    }

    None
}

impl PreferForOfVisitor<'_> {
    fn analyze(&self, for_stmt: &ForStmt, site: &MemberExpr) -> Option<Diagnostic> {
        // Not every located property access is a length access; a loop bound
        // by `obj.size` is not iterating an array-like.
        let MemberProp::Ident(prop) = &site.prop else {
            return None;
        };
        if prop.sym.as_ref() != LENGTH_PROPERTY {
            return None;
        }

        let update = for_stmt.update.as_deref()?;
        let update_span = update.span();
        let update_src = self.ctx.get_source_text(update_span)?;
        let (token_offset, index_text) = index_token_in_update(update_src)?;
        let anchor = update_span.lo.0 + token_offset as u32;

        let array_text = self.ctx.get_source_text(site.obj.span())?;

        let references = self
            .references
            .find_references(anchor, &[self.file_path.as_str()]);
        let file_references = references.first()?;
        if file_references.spans.is_empty() {
            return None;
        }

        // Approximate uses strictly inside the body by discounting the
        // canonical header occurrences. Signed: non-canonical headers can
        // push this below zero.
        let loop_local_usages = file_references.spans.len() as isize - HEADER_INDEX_USAGES;

        let body_src = self.ctx.get_source_text(for_stmt.body.span())?;
        let pattern = format!(
            r"{}\[\s*{}\s*\]",
            escape_dots(array_text),
            escape_dots(index_text)
        );
        let access_regex = Regex::new(&pattern).ok()?;
        let match_count = access_regex.find_iter(body_src).count() as isize;

        // Every body-local use of the index is accounted for by an
        // `arr[i]`-shaped access: the index has no independent use.
        if match_count >= loop_local_usages {
            let span = for_stmt.span;
            let (line, column, end_line, end_column) = self.ctx.span_to_range(span);
            let diagnostic = Diagnostic::new(
                "M001",
                Severity::Warning,
                MESSAGE,
                &self.file_path,
                line,
                column,
            )
            .with_end(end_line, end_column)
            .with_offsets(span.lo.0 as usize, (span.hi.0 - span.lo.0) as usize)
            .with_suggestion(format!(
                "Iterate the elements of '{}' directly with for...of",
                array_text
            ));
            Some(diagnostic)
        } else {
            None
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Extract the index-variable token from the increment clause's source text.
///
/// The first token is the variable for postfix and compound forms (`i++`,
/// `i += 1`); when the clause starts with an operator character the variable
/// is the trailing token instead (`++i`, `--i`). Returns the token and its
/// byte offset within the clause.
fn index_token_in_update(update_src: &str) -> Option<(usize, &str)> {
    let leading_ws = update_src.len() - update_src.trim_start().len();
    let trimmed = update_src.trim();
    let first = trimmed.chars().next()?;

    if first == '+' || first == '-' {
        let (start, token) = last_identifier_run(trimmed)?;
        Some((leading_ws + start, token))
    } else {
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !is_identifier_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        if end == 0 {
            return None;
        }
        Some((leading_ws, &trimmed[..end]))
    }
}

fn last_identifier_run(s: &str) -> Option<(usize, &str)> {
    let mut run_start = None;
    let mut last_run = None;

    for (i, c) in s.char_indices() {
        if is_identifier_char(c) {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            last_run = Some((start, &s[start..i]));
        }
    }
    if let Some(start) = run_start {
        last_run = Some((start, &s[start..]));
    }

    last_run
}

/// Escape literal dots so `this.items` matches as text, not as a wildcard.
fn escape_dots(s: &str) -> String {
    s.replace('.', "\\.")
}
