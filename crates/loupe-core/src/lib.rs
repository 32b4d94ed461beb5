//! Core analysis engine for Loupe.
//!
//! Loupe inspects JavaScript/TypeScript sources for index-based `for` loops
//! that could be written as `for...of` loops. This crate provides the parser
//! wrapper, the AST visitor framework, a per-file identifier reference index,
//! the rule registry, and the shipped rules.

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod parser;
pub mod references;
pub mod rules;
pub mod visitor;

pub use analysis::AnalysisEngine;
pub use diagnostic::Diagnostic;
pub use parser::ParsedFile;
