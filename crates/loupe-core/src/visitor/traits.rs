//! AstVisitor trait for uniform AST traversal.

use std::ops::ControlFlow;

use swc_ecma_ast::{
    ArrowExpr, BinExpr, CallExpr, FnDecl, ForStmt, Ident, MemberExpr, UpdateExpr, VarDecl,
};

use super::context::VisitorContext;

/// Hooks invoked by [`super::walk_ast`] once per node, in document order,
/// before the walk descends into that node's children. Returning
/// `ControlFlow::Break(())` stops the whole traversal.
pub trait AstVisitor {
    fn visit_for_stmt(&mut self, _node: &ForStmt, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_fn_decl(&mut self, _node: &FnDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_arrow_expr(&mut self, _node: &ArrowExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_var_decl(&mut self, _node: &VarDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_call_expr(&mut self, _node: &CallExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_member_expr(&mut self, _node: &MemberExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_bin_expr(&mut self, _node: &BinExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_update_expr(&mut self, _node: &UpdateExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_ident(&mut self, _node: &Ident, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
