//! Per-file identifier reference lookup.
//!
//! [`ReferenceIndex`] plays the role a language service's document-highlight
//! query plays in editor tooling: given the offset of an identifier, return
//! every span in the file that refers to the same binding. Occurrences are
//! grouped by a scope-aware resolution pass (function scoping for `var` and
//! hoisted declarations, block scoping for `let`/`const`), so `i` in one
//! function does not pollute the count for `i` in another.

use std::collections::HashMap;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, CatchClause, ClassDecl, Decl, FnDecl, FnExpr, ForHead,
    ForInStmt, ForOfStmt, ForStmt, Function, Ident, Module, ModuleItem, ObjectPatProp, Pat, Stmt,
    VarDecl, VarDeclKind, VarDeclOrExpr, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::parser::ParsedFile;

/// All reference spans for one file, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReferences {
    pub file: String,
    pub spans: Vec<Span>,
}

/// Immutable index of resolved identifier references in a single parsed file.
pub struct ReferenceIndex {
    filename: String,
    bindings: Vec<Vec<Span>>,
}

impl ReferenceIndex {
    /// Build the index from the file's module. A file without a parsed
    /// module yields an empty index.
    pub fn build(file: &ParsedFile) -> Self {
        let mut collector = ScopedCollector::new();
        if let Some(module) = file.module() {
            module.visit_with(&mut collector);
        }

        let mut bindings = collector.bindings;
        for spans in &mut bindings {
            spans.sort_by_key(|span| span.lo.0);
        }

        Self {
            filename: file.metadata().filename.clone(),
            bindings,
        }
    }

    /// Find every reference to the binding whose identifier occurs at
    /// `offset`, restricted to `scope_files`. Returns one entry per matching
    /// file; empty when the offset does not land on a known identifier or
    /// the indexed file is out of scope.
    pub fn find_references(&self, offset: u32, scope_files: &[&str]) -> Vec<FileReferences> {
        if !scope_files.iter().any(|f| *f == self.filename) {
            return Vec::new();
        }

        let Some(spans) = self.binding_at(offset) else {
            return Vec::new();
        };

        vec![FileReferences {
            file: self.filename.clone(),
            spans: spans.to_vec(),
        }]
    }

    fn binding_at(&self, offset: u32) -> Option<&[Span]> {
        self.bindings
            .iter()
            .find(|spans| {
                spans
                    .iter()
                    .any(|span| span.lo.0 <= offset && offset < span.hi.0)
            })
            .map(|spans| spans.as_slice())
    }
}

struct Scope {
    names: HashMap<String, usize>,
    function_like: bool,
}

/// Single-pass scope resolver in the spirit of a scope-tree builder:
/// function-like scopes hoist `var` and function declarations before their
/// statements are visited, block scopes hold `let`/`const`. Identifiers that
/// resolve to no declaration share one implicit global binding per name.
struct ScopedCollector {
    bindings: Vec<Vec<Span>>,
    scopes: Vec<Scope>,
    implicit_globals: HashMap<String, usize>,
    current_decl_kind: VarDeclKind,
}

impl ScopedCollector {
    fn new() -> Self {
        Self {
            bindings: Vec::new(),
            scopes: Vec::new(),
            implicit_globals: HashMap::new(),
            current_decl_kind: VarDeclKind::Var,
        }
    }

    fn push_scope(&mut self, function_like: bool) {
        self.scopes.push(Scope {
            names: HashMap::new(),
            function_like,
        });
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn new_binding(&mut self) -> usize {
        self.bindings.push(Vec::new());
        self.bindings.len() - 1
    }

    /// Bind `name` in the innermost scope (block scoping).
    fn declare_lexical(&mut self, name: &str, span: Span) {
        let existing = self.scopes.last().and_then(|s| s.names.get(name)).copied();
        let binding = match existing {
            Some(binding) => binding,
            None => {
                let binding = self.new_binding();
                if let Some(scope) = self.scopes.last_mut() {
                    scope.names.insert(name.to_string(), binding);
                }
                binding
            }
        };
        self.bindings[binding].push(span);
    }

    /// Bind `name` in the innermost function-like scope (var scoping).
    fn declare_hoisted(&mut self, name: &str, span: Option<Span>) {
        let index = self
            .scopes
            .iter()
            .rposition(|s| s.function_like)
            .unwrap_or(0);
        let existing = self.scopes[index].names.get(name).copied();
        let binding = match existing {
            Some(binding) => binding,
            None => {
                let binding = self.new_binding();
                self.scopes[index].names.insert(name.to_string(), binding);
                binding
            }
        };
        if let Some(span) = span {
            self.bindings[binding].push(span);
        }
    }

    fn record_reference(&mut self, name: &str, span: Span) {
        let resolved = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.names.get(name).copied());
        if let Some(binding) = resolved {
            self.bindings[binding].push(span);
            return;
        }
        let existing = self.implicit_globals.get(name).copied();
        let binding = match existing {
            Some(binding) => binding,
            None => {
                let binding = self.new_binding();
                self.implicit_globals.insert(name.to_string(), binding);
                binding
            }
        };
        self.bindings[binding].push(span);
    }

    fn declare_pat(&mut self, pat: &Pat, kind: VarDeclKind) {
        match pat {
            Pat::Ident(ident) => match kind {
                VarDeclKind::Var => self.declare_hoisted(&ident.id.sym, Some(ident.id.span)),
                _ => self.declare_lexical(&ident.id.sym, ident.id.span),
            },
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.declare_pat(elem, kind);
                }
            }
            Pat::Object(obj) => {
                for prop in &obj.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.declare_pat(&kv.value, kind),
                        ObjectPatProp::Assign(assign) => {
                            match kind {
                                VarDeclKind::Var => {
                                    self.declare_hoisted(&assign.key.sym, Some(assign.key.span()))
                                }
                                _ => self.declare_lexical(&assign.key.sym, assign.key.span()),
                            }
                            if let Some(value) = &assign.value {
                                value.visit_with(self);
                            }
                        }
                        ObjectPatProp::Rest(rest) => self.declare_pat(&rest.arg, kind),
                    }
                }
            }
            Pat::Rest(rest) => self.declare_pat(&rest.arg, kind),
            Pat::Assign(assign) => {
                self.declare_pat(&assign.left, kind);
                assign.right.visit_with(self);
            }
            Pat::Expr(_) | Pat::Invalid(_) => {}
        }
    }

    /// Pre-bind `var` and function declarations of a function-like scope so
    /// use-before-declaration still resolves to the same binding. Does not
    /// descend into nested functions.
    fn hoist_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.hoist_stmt(stmt);
        }
    }

    fn hoist_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(Decl::Var(var_decl)) if var_decl.kind == VarDeclKind::Var => {
                for declarator in &var_decl.decls {
                    self.hoist_pat(&declarator.name);
                }
            }
            Stmt::Decl(Decl::Fn(fn_decl)) => {
                self.declare_hoisted(&fn_decl.ident.sym, None);
            }
            Stmt::Block(block) => self.hoist_stmts(&block.stmts),
            Stmt::If(if_stmt) => {
                self.hoist_stmt(&if_stmt.cons);
                if let Some(alt) = &if_stmt.alt {
                    self.hoist_stmt(alt);
                }
            }
            Stmt::For(for_stmt) => {
                if let Some(VarDeclOrExpr::VarDecl(var_decl)) = &for_stmt.init {
                    if var_decl.kind == VarDeclKind::Var {
                        for declarator in &var_decl.decls {
                            self.hoist_pat(&declarator.name);
                        }
                    }
                }
                self.hoist_stmt(&for_stmt.body);
            }
            Stmt::ForIn(for_in) => {
                self.hoist_for_head(&for_in.left);
                self.hoist_stmt(&for_in.body);
            }
            Stmt::ForOf(for_of) => {
                self.hoist_for_head(&for_of.left);
                self.hoist_stmt(&for_of.body);
            }
            Stmt::While(while_stmt) => self.hoist_stmt(&while_stmt.body),
            Stmt::DoWhile(do_while) => self.hoist_stmt(&do_while.body),
            Stmt::Try(try_stmt) => {
                self.hoist_stmts(&try_stmt.block.stmts);
                if let Some(handler) = &try_stmt.handler {
                    self.hoist_stmts(&handler.body.stmts);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.hoist_stmts(&finalizer.stmts);
                }
            }
            Stmt::Switch(switch_stmt) => {
                for case in &switch_stmt.cases {
                    self.hoist_stmts(&case.cons);
                }
            }
            Stmt::Labeled(labeled) => self.hoist_stmt(&labeled.body),
            _ => {}
        }
    }

    fn hoist_for_head(&mut self, head: &ForHead) {
        if let ForHead::VarDecl(var_decl) = head {
            if var_decl.kind == VarDeclKind::Var {
                for declarator in &var_decl.decls {
                    self.hoist_pat(&declarator.name);
                }
            }
        }
    }

    fn hoist_pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(ident) => self.declare_hoisted(&ident.id.sym, None),
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.hoist_pat(elem);
                }
            }
            Pat::Object(obj) => {
                for prop in &obj.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.hoist_pat(&kv.value),
                        ObjectPatProp::Assign(assign) => {
                            self.declare_hoisted(&assign.key.sym, None)
                        }
                        ObjectPatProp::Rest(rest) => self.hoist_pat(&rest.arg),
                    }
                }
            }
            Pat::Rest(rest) => self.hoist_pat(&rest.arg),
            Pat::Assign(assign) => self.hoist_pat(&assign.left),
            Pat::Expr(_) | Pat::Invalid(_) => {}
        }
    }
}

impl Visit for ScopedCollector {
    fn visit_module(&mut self, module: &Module) {
        self.push_scope(true);
        for item in &module.body {
            if let ModuleItem::Stmt(stmt) = item {
                self.hoist_stmt(stmt);
            }
        }
        module.visit_children_with(self);
        self.pop_scope();
    }

    fn visit_ident(&mut self, node: &Ident) {
        self.record_reference(&node.sym, node.span);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        let previous = self.current_decl_kind;
        self.current_decl_kind = node.kind;
        node.visit_children_with(self);
        self.current_decl_kind = previous;
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.declare_pat(&node.name, self.current_decl_kind);
        if let Some(init) = &node.init {
            init.visit_with(self);
        }
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        // The name lives in the enclosing scope (pre-bound by hoisting).
        self.declare_hoisted(&node.ident.sym, Some(node.ident.span));
        node.function.visit_with(self);
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        // A function expression's own name is skipped; it only names the
        // function inside itself.
        node.function.visit_with(self);
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.declare_lexical(&node.ident.sym, node.ident.span);
        node.class.visit_with(self);
    }

    fn visit_function(&mut self, node: &Function) {
        self.push_scope(true);
        for param in &node.params {
            self.declare_pat(&param.pat, VarDeclKind::Var);
        }
        if let Some(body) = &node.body {
            self.hoist_stmts(&body.stmts);
            for stmt in &body.stmts {
                stmt.visit_with(self);
            }
        }
        self.pop_scope();
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.push_scope(true);
        for param in &node.params {
            self.declare_pat(param, VarDeclKind::Var);
        }
        match &*node.body {
            BlockStmtOrExpr::BlockStmt(block) => {
                self.hoist_stmts(&block.stmts);
                for stmt in &block.stmts {
                    stmt.visit_with(self);
                }
            }
            BlockStmtOrExpr::Expr(expr) => expr.visit_with(self),
        }
        self.pop_scope();
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.push_scope(false);
        node.visit_children_with(self);
        self.pop_scope();
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.push_scope(false);
        node.visit_children_with(self);
        self.pop_scope();
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.push_scope(false);
        node.visit_children_with(self);
        self.pop_scope();
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.push_scope(false);
        node.visit_children_with(self);
        self.pop_scope();
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.push_scope(false);
        if let Some(param) = &node.param {
            self.declare_pat(param, VarDeclKind::Let);
        }
        node.body.visit_children_with(self);
        self.pop_scope();
    }
}
