//! Document-order AST walk driving [`AstVisitor`] hooks.

use std::ops::ControlFlow;

use swc_ecma_ast::{
    BlockStmt, BlockStmtOrExpr, Callee, ClassMember, Decl, Expr, ForHead, Function, MemberProp,
    Module, ModuleDecl, ModuleItem, Stmt, VarDecl, VarDeclOrExpr,
};

use super::context::VisitorContext;
use super::traits::AstVisitor;

macro_rules! flow {
    ($e:expr) => {
        if $e.is_break() {
            return ControlFlow::Break(());
        }
    };
}

/// Walk the module, invoking visitor hooks before descending into each node.
pub fn walk_ast<V: AstVisitor>(module: &Module, visitor: &mut V, ctx: &VisitorContext) {
    let _ = walk_module(module, visitor, ctx);
}

fn walk_module<V: AstVisitor>(
    module: &Module,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    for item in &module.body {
        flow!(walk_module_item(item, visitor, ctx));
    }
    ControlFlow::Continue(())
}

fn walk_module_item<V: AstVisitor>(
    item: &ModuleItem,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    match item {
        ModuleItem::Stmt(stmt) => walk_stmt(stmt, visitor, ctx),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
            walk_decl(&export.decl, visitor, ctx)
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            walk_expr(&export.expr, visitor, ctx)
        }
        ModuleItem::ModuleDecl(_) => ControlFlow::Continue(()),
    }
}

fn walk_block<V: AstVisitor>(
    block: &BlockStmt,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    for stmt in &block.stmts {
        flow!(walk_stmt(stmt, visitor, ctx));
    }
    ControlFlow::Continue(())
}

fn walk_decl<V: AstVisitor>(
    decl: &Decl,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    match decl {
        Decl::Var(var_decl) => walk_var_decl(var_decl, visitor, ctx),
        Decl::Fn(fn_decl) => {
            flow!(visitor.visit_fn_decl(fn_decl, ctx));
            walk_function(&fn_decl.function, visitor, ctx)
        }
        Decl::Class(class_decl) => {
            for member in &class_decl.class.body {
                match member {
                    ClassMember::Method(method) => {
                        flow!(walk_function(&method.function, visitor, ctx));
                    }
                    ClassMember::PrivateMethod(method) => {
                        flow!(walk_function(&method.function, visitor, ctx));
                    }
                    ClassMember::Constructor(ctor) => {
                        if let Some(body) = &ctor.body {
                            flow!(walk_block(body, visitor, ctx));
                        }
                    }
                    ClassMember::StaticBlock(static_block) => {
                        flow!(walk_block(&static_block.body, visitor, ctx));
                    }
                    _ => {}
                }
            }
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    }
}

fn walk_var_decl<V: AstVisitor>(
    var_decl: &VarDecl,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    flow!(visitor.visit_var_decl(var_decl, ctx));
    for declarator in &var_decl.decls {
        if let Some(init) = &declarator.init {
            flow!(walk_expr(init, visitor, ctx));
        }
    }
    ControlFlow::Continue(())
}

fn walk_function<V: AstVisitor>(
    function: &Function,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    if let Some(body) = &function.body {
        flow!(walk_block(body, visitor, ctx));
    }
    ControlFlow::Continue(())
}

fn walk_stmt<V: AstVisitor>(
    stmt: &Stmt,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    match stmt {
        Stmt::Block(block) => walk_block(block, visitor, ctx),
        Stmt::Decl(decl) => walk_decl(decl, visitor, ctx),
        Stmt::Expr(expr_stmt) => walk_expr(&expr_stmt.expr, visitor, ctx),
        Stmt::If(if_stmt) => {
            flow!(walk_expr(&if_stmt.test, visitor, ctx));
            flow!(walk_stmt(&if_stmt.cons, visitor, ctx));
            if let Some(alt) = &if_stmt.alt {
                flow!(walk_stmt(alt, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Stmt::For(for_stmt) => {
            // Hook first, descent after: nested loops are still visited.
            flow!(visitor.visit_for_stmt(for_stmt, ctx));
            match &for_stmt.init {
                Some(VarDeclOrExpr::VarDecl(var_decl)) => {
                    flow!(walk_var_decl(var_decl, visitor, ctx));
                }
                Some(VarDeclOrExpr::Expr(expr)) => {
                    flow!(walk_expr(expr, visitor, ctx));
                }
                None => {}
            }
            if let Some(test) = &for_stmt.test {
                flow!(walk_expr(test, visitor, ctx));
            }
            if let Some(update) = &for_stmt.update {
                flow!(walk_expr(update, visitor, ctx));
            }
            walk_stmt(&for_stmt.body, visitor, ctx)
        }
        Stmt::ForIn(for_in) => {
            flow!(walk_for_head(&for_in.left, visitor, ctx));
            flow!(walk_expr(&for_in.right, visitor, ctx));
            walk_stmt(&for_in.body, visitor, ctx)
        }
        Stmt::ForOf(for_of) => {
            flow!(walk_for_head(&for_of.left, visitor, ctx));
            flow!(walk_expr(&for_of.right, visitor, ctx));
            walk_stmt(&for_of.body, visitor, ctx)
        }
        Stmt::While(while_stmt) => {
            flow!(walk_expr(&while_stmt.test, visitor, ctx));
            walk_stmt(&while_stmt.body, visitor, ctx)
        }
        Stmt::DoWhile(do_while) => {
            flow!(walk_stmt(&do_while.body, visitor, ctx));
            walk_expr(&do_while.test, visitor, ctx)
        }
        Stmt::Switch(switch_stmt) => {
            flow!(walk_expr(&switch_stmt.discriminant, visitor, ctx));
            for case in &switch_stmt.cases {
                if let Some(test) = &case.test {
                    flow!(walk_expr(test, visitor, ctx));
                }
                for s in &case.cons {
                    flow!(walk_stmt(s, visitor, ctx));
                }
            }
            ControlFlow::Continue(())
        }
        Stmt::Try(try_stmt) => {
            flow!(walk_block(&try_stmt.block, visitor, ctx));
            if let Some(handler) = &try_stmt.handler {
                flow!(walk_block(&handler.body, visitor, ctx));
            }
            if let Some(finalizer) = &try_stmt.finalizer {
                flow!(walk_block(finalizer, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Stmt::Return(ret) => {
            if let Some(arg) = &ret.arg {
                flow!(walk_expr(arg, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Stmt::Throw(throw) => walk_expr(&throw.arg, visitor, ctx),
        Stmt::Labeled(labeled) => walk_stmt(&labeled.body, visitor, ctx),
        Stmt::With(with_stmt) => {
            flow!(walk_expr(&with_stmt.obj, visitor, ctx));
            walk_stmt(&with_stmt.body, visitor, ctx)
        }
        _ => ControlFlow::Continue(()),
    }
}

fn walk_for_head<V: AstVisitor>(
    head: &ForHead,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    match head {
        ForHead::VarDecl(var_decl) => walk_var_decl(var_decl, visitor, ctx),
        ForHead::Pat(_) | ForHead::UsingDecl(_) => ControlFlow::Continue(()),
    }
}

fn walk_expr<V: AstVisitor>(
    expr: &Expr,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> ControlFlow<()> {
    match expr {
        Expr::Ident(ident) => visitor.visit_ident(ident, ctx),
        Expr::Bin(bin) => {
            flow!(visitor.visit_bin_expr(bin, ctx));
            flow!(walk_expr(&bin.left, visitor, ctx));
            walk_expr(&bin.right, visitor, ctx)
        }
        Expr::Unary(unary) => walk_expr(&unary.arg, visitor, ctx),
        Expr::Update(update) => {
            flow!(visitor.visit_update_expr(update, ctx));
            walk_expr(&update.arg, visitor, ctx)
        }
        Expr::Assign(assign) => walk_expr(&assign.right, visitor, ctx),
        Expr::Member(member) => {
            flow!(visitor.visit_member_expr(member, ctx));
            flow!(walk_expr(&member.obj, visitor, ctx));
            if let MemberProp::Computed(computed) = &member.prop {
                flow!(walk_expr(&computed.expr, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Expr::Cond(cond) => {
            flow!(walk_expr(&cond.test, visitor, ctx));
            flow!(walk_expr(&cond.cons, visitor, ctx));
            walk_expr(&cond.alt, visitor, ctx)
        }
        Expr::Call(call) => {
            flow!(visitor.visit_call_expr(call, ctx));
            if let Callee::Expr(callee) = &call.callee {
                flow!(walk_expr(callee, visitor, ctx));
            }
            for arg in &call.args {
                flow!(walk_expr(&arg.expr, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Expr::New(new_expr) => {
            flow!(walk_expr(&new_expr.callee, visitor, ctx));
            if let Some(args) = &new_expr.args {
                for arg in args {
                    flow!(walk_expr(&arg.expr, visitor, ctx));
                }
            }
            ControlFlow::Continue(())
        }
        Expr::Seq(seq) => {
            for e in &seq.exprs {
                flow!(walk_expr(e, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Expr::Paren(paren) => walk_expr(&paren.expr, visitor, ctx),
        Expr::Arrow(arrow) => {
            flow!(visitor.visit_arrow_expr(arrow, ctx));
            match &*arrow.body {
                BlockStmtOrExpr::BlockStmt(block) => walk_block(block, visitor, ctx),
                BlockStmtOrExpr::Expr(expr) => walk_expr(expr, visitor, ctx),
            }
        }
        Expr::Fn(fn_expr) => walk_function(&fn_expr.function, visitor, ctx),
        Expr::Array(array) => {
            for elem in array.elems.iter().flatten() {
                flow!(walk_expr(&elem.expr, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Expr::Object(obj) => {
            for prop in &obj.props {
                match prop {
                    swc_ecma_ast::PropOrSpread::Spread(spread) => {
                        flow!(walk_expr(&spread.expr, visitor, ctx));
                    }
                    swc_ecma_ast::PropOrSpread::Prop(prop) => match prop.as_ref() {
                        swc_ecma_ast::Prop::KeyValue(kv) => {
                            flow!(walk_expr(&kv.value, visitor, ctx));
                        }
                        swc_ecma_ast::Prop::Method(method) => {
                            flow!(walk_function(&method.function, visitor, ctx));
                        }
                        swc_ecma_ast::Prop::Getter(getter) => {
                            if let Some(body) = &getter.body {
                                flow!(walk_block(body, visitor, ctx));
                            }
                        }
                        swc_ecma_ast::Prop::Setter(setter) => {
                            if let Some(body) = &setter.body {
                                flow!(walk_block(body, visitor, ctx));
                            }
                        }
                        _ => {}
                    },
                }
            }
            ControlFlow::Continue(())
        }
        Expr::Tpl(tpl) => {
            for e in &tpl.exprs {
                flow!(walk_expr(e, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        Expr::Await(await_expr) => walk_expr(&await_expr.arg, visitor, ctx),
        Expr::Yield(yield_expr) => {
            if let Some(arg) = &yield_expr.arg {
                flow!(walk_expr(arg, visitor, ctx));
            }
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    }
}
