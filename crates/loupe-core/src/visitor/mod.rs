//! AST traversal framework.
//!
//! Rules observe the tree through the [`AstVisitor`] hook trait; [`walk_ast`]
//! drives a document-order traversal, invoking each hook before descending
//! into the node's children.

mod context;
mod traits;
mod walk;

pub use context::VisitorContext;
pub use traits::AstVisitor;
pub use walk::walk_ast;
